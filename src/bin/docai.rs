use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use rusty_docai::{AccessStore, DocAi, JsonFileStore, init_tracing};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Setting {
    Url,
    Token,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Check {
    Connection,
}

/// Manage the default access pair used by `DocAi::from_config`.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Print a stored value
    #[arg(long, value_enum)]
    get: Option<Setting>,

    /// Store the default token
    #[arg(long, value_name = "TOKEN")]
    set_token: Option<String>,

    /// Store the default base URL
    #[arg(long, value_name = "URL")]
    set_url: Option<String>,

    /// Run a check against the service with the stored access pair
    #[arg(long, value_enum)]
    test: Option<Check>,

    /// Use this access file instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let store = match &args.config {
        Some(path) => JsonFileStore::at(path),
        None => JsonFileStore::default_location()?,
    };

    for saved in save_defaults(&store, args.set_token, args.set_url)? {
        println!("Default {saved} saved");
    }

    if let Some(setting) = args.get {
        let config = store.load()?;
        let (value, name) = match setting {
            Setting::Url => (config.url, "url"),
            Setting::Token => (config.token, "token"),
        };
        match value {
            Some(value) => println!("{value}"),
            None => bail!("No default {name} found"),
        }
    }

    if let Some(Check::Connection) = args.test {
        let sdk = DocAi::from_store(&store).context("Connection test needs a url and a token")?;
        let count = sdk
            .test_connection()
            .with_context(|| format!("Unable to reach {}", sdk.access().url()))?;
        println!("Connected to {} ({count} fields available)", sdk.access().url());
    }

    Ok(())
}

/// Writes the given values into the store, keeping the others. Returns the
/// names of the values written, only once they are on disk.
fn save_defaults(
    store: &JsonFileStore,
    token: Option<String>,
    url: Option<String>,
) -> anyhow::Result<Vec<&'static str>> {
    if token.is_none() && url.is_none() {
        return Ok(Vec::new());
    }

    let mut config = store.load()?;
    let mut saved = Vec::new();
    if let Some(token) = token {
        config.token = Some(token);
        saved.push("token");
    }
    if let Some(url) = url {
        config.url = Some(url);
        saved.push("url");
    }
    store
        .save(&config)
        .with_context(|| format!("Unable to write {}", store.path().display()))?;
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saving_keeps_the_other_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::at(dir.path().join("access.json"));

        let saved = save_defaults(&store, None, Some("https://docai.test".to_owned())).unwrap();
        assert_eq!(saved, vec!["url"]);
        let saved = save_defaults(&store, Some("abc".to_owned()), None).unwrap();
        assert_eq!(saved, vec!["token"]);

        let config = store.load().unwrap();
        assert_eq!(config.url.as_deref(), Some("https://docai.test"));
        assert_eq!(config.token.as_deref(), Some("abc"));
    }

    #[test]
    fn failed_write_reports_nothing_saved() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();
        let store = JsonFileStore::at(blocker.join("access.json"));

        let result = save_defaults(&store, Some("abc".to_owned()), None);

        assert!(result.is_err());
    }
}
