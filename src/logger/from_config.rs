//! Builds a `Logger` from a loaded [`Config`].

use super::Logger;
use crate::Error;
use crate::config::{Config, LevelConfig};
use crate::fmt::{Template, TokenScope, parse_color_spec};
use crate::level::{Level, LevelOptions, LevelRegistry};
use std::sync::Arc;

impl Logger {
    /// Registers the config's custom levels globally and builds a console logger from it.
    ///
    /// # Errors
    /// Invalid templates, colors, token scope, or minimum level.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Self::from_config_with_registry(config, Arc::clone(LevelRegistry::global()))
    }

    /// Like [`Self::from_config`], registering levels into `registry` instead.
    ///
    /// Nothing is registered unless the whole config is valid, including a
    /// minimum level that names one of the config's own levels.
    ///
    /// # Errors
    /// Invalid templates, colors, token scope, or minimum level.
    pub fn from_config_with_registry(
        config: &Config,
        registry: Arc<LevelRegistry>,
    ) -> Result<Self, Error> {
        let levels = config
            .levels
            .iter()
            .map(level_options)
            .collect::<Result<Vec<_>, _>>()?;
        let token_scope: TokenScope = config
            .general
            .token_scope
            .parse()
            .map_err(|_| Error::InvalidTokenScope(config.general.token_scope.clone()))?;

        let min_level = resolve_min_level(&registry, &levels, &config.general.level)?;

        for (level, name, options) in levels {
            registry.register(level, name, options);
        }

        let mut builder = Self::builder()
            .registry(registry)
            .level(min_level)
            .quiet(config.general.quiet)
            .clean(config.general.clean)
            .color(config.general.color)
            .token_scope(token_scope);
        if let Some(path) = config.log_file_path() {
            builder = builder.log_file(path);
        }

        Ok(builder.log_to_file(config.file.enabled).build())
    }
}

/// Parses `name` against the registry's names as they will be once `pending` is registered.
fn resolve_min_level(
    registry: &LevelRegistry,
    pending: &[(Level, String, LevelOptions)],
    name: &str,
) -> Result<Level, Error> {
    let scratch = LevelRegistry::empty();
    for level in registry.levels() {
        scratch.register(level, registry.name(level), LevelOptions::new());
    }
    for (level, pending_name, _) in pending {
        scratch.register(*level, pending_name.as_str(), LevelOptions::new());
    }
    scratch
        .parse_level(name)
        .map_err(|_| Error::InvalidLevel(name.to_string()))
}

fn level_options(entry: &LevelConfig) -> Result<(Level, String, LevelOptions), Error> {
    let mut options = LevelOptions::new();
    if let Some(format) = &entry.format {
        options = options.template(Template::parse(format)?);
    }
    if let Some(color) = &entry.color {
        options = options.color(parse_color_spec(color).map_err(Error::InvalidColor)?);
    }
    Ok((Level(entry.level), entry.name.clone(), options))
}
