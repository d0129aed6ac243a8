// KVStore — CLI Module
//
// Command-line interface using clap derive macros.
// Subcommands: get, set, remove, encode, decode.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::codec::ScalarType;
use crate::config::{default_data_dir, BackendKind, StoreConfig, DEFAULT_NAMESPACE};

pub use commands::execute;

/// KVStore — typed key-value access to settings and secrets.
#[derive(Parser, Debug)]
#[command(name = "kvstore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Which backend to use.
    #[arg(long, value_enum, env = "KVSTORE_BACKEND", default_value = "settings", global = true)]
    pub backend: BackendKind,

    /// Namespace (keyring service) for the secure backend.
    #[arg(long, env = "KVSTORE_NAMESPACE", default_value = DEFAULT_NAMESPACE, global = true)]
    pub namespace: String,

    /// Directory holding the settings database.
    #[arg(long, env = "KVSTORE_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Print the full result, including provenance, as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn config(&self) -> StoreConfig {
        StoreConfig {
            backend: self.backend,
            namespace: self.namespace.clone(),
            data_dir: self.data_dir.clone().unwrap_or_else(default_data_dir),
        }
    }
}

/// Value type selector. Each maps to one typed store method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TypeArg {
    Bool,
    Int64,
    Uint64,
    Double,
    Float,
    String,
    Bytes,
}

impl From<TypeArg> for ScalarType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Bool => ScalarType::Bool,
            TypeArg::Int64 => ScalarType::Int64,
            TypeArg::Uint64 => ScalarType::UInt64,
            TypeArg::Double => ScalarType::Double,
            TypeArg::Float => ScalarType::Float,
            TypeArg::String => ScalarType::String,
            TypeArg::Bytes => ScalarType::Bytes,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read a key as the given type.
    Get {
        key: String,

        #[arg(long = "type", short = 't', value_enum)]
        ty: TypeArg,
    },

    /// Write a value. Bytes are given as hex.
    Set {
        key: String,

        value: String,

        #[arg(long = "type", short = 't', value_enum)]
        ty: TypeArg,
    },

    /// Delete a key. Succeeds if the key does not exist.
    Remove { key: String },

    /// Print the tagged record for a value, as hex.
    Encode {
        value: String,

        #[arg(long = "type", short = 't', value_enum)]
        ty: TypeArg,
    },

    /// Decode a hex record as the given type.
    Decode {
        record: String,

        #[arg(long = "type", short = 't', value_enum)]
        ty: TypeArg,
    },
}
