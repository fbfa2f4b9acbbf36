use anyhow::{bail, Context, Result};
use std::{
    env,
    path::{Path, PathBuf},
};

pub const TOKEN_VAR: &str = "CLOUDFLARE_API_TOKEN";

#[derive(Debug)]
pub struct Config {
    pub api_token: String,
}

impl Config {
    /// Loads the env file (the given one, or the first of
    /// `~/.dotfiles/.env` and `./.env` that exists) and reads the API token
    /// from the environment. Variables already set in the process win over
    /// the file.
    pub fn load(env_file: Option<&Path>) -> Result<Self> {
        match env_file.map(Path::to_path_buf).or_else(default_env_file) {
            Some(path) => Self::load_from(&path),
            None => Self::from_token(env::var(TOKEN_VAR).ok()),
        }
    }

    /// Loads one specific env file, then reads the token. A missing or
    /// malformed file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        dotenvy::from_path(path)
            .with_context(|| format!("Failed to load env file: {}", path.display()))?;

        Self::from_token(env::var(TOKEN_VAR).ok())
    }

    pub fn from_token(token: Option<String>) -> Result<Self> {
        match token {
            Some(api_token) if !api_token.is_empty() => Ok(Self { api_token }),
            _ => bail!("{} must be set in ~/.dotfiles/.env or .env", TOKEN_VAR),
        }
    }
}

fn default_env_file() -> Option<PathBuf> {
    let dotfile = env::var_os("HOME").map(|home| PathBuf::from(home).join(".dotfiles").join(".env"));

    match dotfile {
        Some(path) if path.exists() => Some(path),
        _ => {
            let local = PathBuf::from(".env");
            local.exists().then_some(local)
        }
    }
}
