//! cryptenv - encrypted environment variables in a single blob.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── keygen        # Generate a key
//! │   ├── encrypt       # .env / JSON -> blob
//! │   ├── decrypt       # blob -> .env / JSON
//! │   └── run           # Run with decrypted variables injected
//! └── core/             # Core library components
//!     ├── codec         # base64 and JSON conversions
//!     ├── cipher        # AES-256-CBC envelope
//!     ├── strategy      # Key and payload sources
//!     ├── store         # Target key-value stores
//!     ├── bootstrap     # encrypt / decrypt / bootstrap
//!     ├── dotenv        # .env parsing and rendering
//!     └── config        # .cryptenv.toml
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::collections::HashMap;
//! use cryptenv::{bootstrap, cipher, Strategy};
//!
//! let key = cipher::generate_key();
//! let mut secrets = HashMap::new();
//! secrets.insert("DATABASE_URL", "postgres://localhost/app");
//!
//! let blob = cryptenv::encrypt(&secrets, &key)?;
//!
//! let mut env: HashMap<String, String> = HashMap::new();
//! bootstrap(&Strategy::external(key.to_vec(), blob), &mut env, true)?;
//! assert_eq!(env["DATABASE_URL"], "postgres://localhost/app");
//! # Ok::<(), cryptenv::error::Error>(())
//! ```
//!
//! The envelope is not authenticated. See [`core::cipher`] for what that
//! means for wrong keys and tampered payloads.

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::bootstrap::{bootstrap, bootstrap_process_env, decrypt, encrypt, Report};
pub use crate::core::codec::Mapping;
pub use crate::core::store::{ProcessEnv, Store};
pub use crate::core::strategy::Strategy;
pub use crate::core::{cipher, codec};
pub use crate::error::{Error, Result};
