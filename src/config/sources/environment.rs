//! Environment source: `LAYERTREE__LOGGING__LEVEL=debug`, `LAYERTREE__LAYERS=a.conf,b.conf`

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub const ENV_PREFIX: &str = "LAYERTREE";

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("layers")
            .try_parsing(true),
    )
}
