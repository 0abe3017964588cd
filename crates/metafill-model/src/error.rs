use thiserror::Error;

/// Configuration-shape failures raised while combining or flattening config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("sample type '{sample_type}' has an invalid shape: {message}")]
    InvalidSampleShape {
        sample_type: String,
        message: String,
    },

    #[error(
        "host type '{host_type}': sample type '{sample_type}' aliases '{target}', which is itself an alias"
    )]
    ChainedAlias {
        host_type: String,
        sample_type: String,
        target: String,
    },

    #[error("host type '{host_type}': sample type '{sample_type}' aliases unknown sample type '{target}'")]
    UnknownAliasTarget {
        host_type: String,
        sample_type: String,
        target: String,
    },

    #[error("host type '{host_type}': sample type '{sample_type}' names itself as its base type")]
    SelfBase {
        host_type: String,
        sample_type: String,
    },

    #[error(
        "host type '{host_type}': base type '{base_type}' of sample type '{sample_type}' has a base type of its own"
    )]
    ChainedBase {
        host_type: String,
        sample_type: String,
        base_type: String,
    },

    #[error(
        "host type '{host_type}': sample type '{sample_type}' names unknown base type '{base_type}'"
    )]
    UnknownBaseType {
        host_type: String,
        sample_type: String,
        base_type: String,
    },

    #[error(
        "host type '{host_type}': base type '{base_type}' of sample type '{sample_type}' is an alias"
    )]
    BaseTypeIsAlias {
        host_type: String,
        sample_type: String,
        base_type: String,
    },

    #[error("expected exactly one root host type, found {count}: [{}]", .hosts.join(", "))]
    MultiRoot { count: usize, hosts: Vec<String> },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
