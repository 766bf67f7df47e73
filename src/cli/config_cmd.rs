//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(unknown_key(key));
    }

    let mut config = store.load().await?;

    match key {
        "anki_url" => config.anki_url = Some(value.to_string()),
        "deck" => config.deck = Some(value.to_string()),
        "note_type" => config.note_type = Some(value.to_string()),
        "sentence_field" => config.sentence_field = Some(value.to_string()),
        "audio_field" => config.audio_field = Some(value.to_string()),
        "host_socket" => config.host_socket = Some(value.to_string()),
        "tags" => {
            config.tags = Some(
                value
                    .split(',')
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect(),
            )
        }
        "history_limit" => {
            config.history_limit =
                Some(
                    value
                        .parse::<usize>()
                        .map_err(|_| ConfigError::ValidationError {
                            key: key.to_string(),
                            message: "Value must be a non-negative integer".to_string(),
                        })?,
                )
        }
        "notify" => {
            config.notify = Some(parse_bool(value).map_err(|_| ConfigError::ValidationError {
                key: key.to_string(),
                message: "Value must be 'true' or 'false'".to_string(),
            })?)
        }
        _ => unreachable!(), // Already validated
    }

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(unknown_key(key));
    }

    let config = store.load().await?;

    let value = match key {
        "anki_url" => config.anki_url,
        "deck" => config.deck,
        "note_type" => config.note_type,
        "sentence_field" => config.sentence_field,
        "audio_field" => config.audio_field,
        "host_socket" => config.host_socket,
        "tags" => config.tags.map(|t| t.join(",")),
        "history_limit" => config.history_limit.map(|n| n.to_string()),
        "notify" => config.notify.map(|b| b.to_string()),
        _ => unreachable!(),
    };

    match value {
        Some(v) => presenter.output(&v),
        None => presenter.output("(not set)"),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    let not_set = || "(not set)".to_string();

    presenter.key_value("anki_url", &config.anki_url.unwrap_or_else(not_set));
    presenter.key_value("deck", &config.deck.unwrap_or_else(not_set));
    presenter.key_value("note_type", &config.note_type.unwrap_or_else(not_set));
    presenter.key_value(
        "sentence_field",
        &config.sentence_field.unwrap_or_else(not_set),
    );
    presenter.key_value("audio_field", &config.audio_field.unwrap_or_else(not_set));
    presenter.key_value(
        "tags",
        &config.tags.map(|t| t.join(",")).unwrap_or_else(not_set),
    );
    presenter.key_value(
        "history_limit",
        &config
            .history_limit
            .map(|n| n.to_string())
            .unwrap_or_else(not_set),
    );
    presenter.key_value("host_socket", &config.host_socket.unwrap_or_else(not_set));
    presenter.key_value(
        "notify",
        &config.notify.map(|b| b.to_string()).unwrap_or_else(not_set),
    );

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().display().to_string());
    Ok(())
}

fn unknown_key(key: &str) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    }
}

fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(()),
    }
}
