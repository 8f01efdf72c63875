//! Serde support for [`Attempt`] (feature-gated).
//!
//! An attempt serializes externally tagged. A failure keeps only the
//! description of its cause, so deserializing it yields a
//! [`DescribedCause`] rather than the original error type.
//!
//! # Example
//!
//! ```rust
//! use attempt::{Attempt, DescribedCause};
//!
//! let parsed = Attempt::from_fn(|| "x".parse::<i32>());
//! let json = serde_json::to_string(&parsed).unwrap();
//! assert_eq!(json, r#"{"Failed":"invalid digit found in string"}"#);
//!
//! let restored: Attempt<i32> = serde_json::from_str(&json).unwrap();
//! assert!(restored.is_failed_with::<DescribedCause>());
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::attempt::Attempt;
use crate::cause::Cause;
use crate::error::DescribedCause;

#[derive(Serialize)]
#[serde(rename = "Attempt")]
enum Outgoing<'a, T> {
    Succeeded(&'a T),
    Failed(String),
}

#[derive(Deserialize)]
#[serde(rename = "Attempt")]
enum Incoming<T> {
    Succeeded(T),
    Failed(String),
}

impl<T> Serialize for Attempt<T>
where
    T: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Attempt::Succeeded(value) => Outgoing::Succeeded(value),
            Attempt::Failed(cause) => Outgoing::Failed(cause.to_string()),
        }
        .serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Attempt<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Incoming::deserialize(deserializer)? {
            Incoming::Succeeded(value) => Attempt::Succeeded(value),
            Incoming::Failed(description) => {
                Attempt::Failed(Cause::new(DescribedCause::new(description)))
            }
        })
    }
}
