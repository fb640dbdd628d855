//! Request and trace identifiers
//!
//! Every HTTP request carries a `RequestId`, reused from the client when it
//! sends a usable one. Seed runs are correlated by dataset digest instead and
//! do not use these types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Longest client-supplied identifier accepted from a header
pub const MAX_HEADER_ID_LEN: usize = 128;

macro_rules! correlation_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh UUIDv7 identifier
            pub fn new() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn from_string(s: String) -> Self {
                Self(s)
            }

            /// Accept a client-supplied header value.
            ///
            /// Returns `None` for values that are blank, longer than
            /// `MAX_HEADER_ID_LEN`, or contain anything but visible ASCII,
            /// so an accepted id can always be echoed back as a header.
            pub fn from_header(value: &str) -> Option<Self> {
                let value = value.trim();
                let usable = !value.is_empty()
                    && value.len() <= MAX_HEADER_ID_LEN
                    && value.bytes().all(|b| b.is_ascii_graphic());
                usable.then(|| Self(value.to_string()))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

correlation_id!(
    /// Identifies one HTTP request
    RequestId
);

correlation_id!(
    /// Identifies a trace spanning several requests, supplied by the caller
    TraceId
);

/// Identifiers attached to a request as it moves through the server
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub request_id: RequestId,
    pub trace_id: Option<TraceId>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_request_id(request_id: RequestId) -> Self {
        Self {
            request_id,
            trace_id: None,
        }
    }

    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Build a context from raw header values, generating a request id when
    /// the client did not send a usable one
    pub fn from_headers(request_id: Option<&str>, trace_id: Option<&str>) -> Self {
        Self {
            request_id: request_id
                .and_then(RequestId::from_header)
                .unwrap_or_default(),
            trace_id: trace_id.and_then(TraceId::from_header),
        }
    }
}
