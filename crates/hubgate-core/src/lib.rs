//! # hubgate Core
//!
//! Request/response translation for the hubgate registry gateway.
//!
//! ```text
//! hubgate-core/src/proxy/
//! ├── routing.rs        # host label / `ns` override → upstream route
//! ├── path.rs           # namespace insertion, encoded-colon repair
//! ├── context.rs        # buffered, replayable inbound request
//! ├── upstream/         # pooled client, forwarding, redirects, token relay
//! ├── common/           # response sanitizing, header constants, error responses
//! ├── handlers/         # registry fallback handler, landing page, search
//! ├── middleware/       # user-agent block list
//! └── server.rs         # AppState + router assembly
//! ```

#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

pub mod proxy;

pub use proxy::server::{build_gateway_router, AppState};
