//! Pager engine: HTTP plumbing and effect execution for the pager core.
mod admin;
mod bridge;
mod decode;
mod engine;
mod fetch;
mod filename;
mod fragment;
mod persist;
mod types;

pub use admin::{parse_envelope, AdminClient, AdminRoutes, ReqwestAdminClient};
pub use bridge::{signal_bridge, SignalReceiver, SignalSender};
pub use decode::{decode_fragment, DecodeError, DecodedFragment};
pub use engine::{EngineCommand, EngineHandle};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use filename::snapshot_filename;
pub use fragment::{summarize_fragment, FragmentSummary};
pub use persist::{ensure_output_dir, render_snapshot, PersistError, SnapshotWriter};
pub use types::{EngineEvent, EnvelopeCode, FailureKind, FetchError, FetchMetadata, FetchOutput};
