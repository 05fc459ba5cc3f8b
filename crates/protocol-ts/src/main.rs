//! TypeScript binding generator for bs-protocol.
//!
//! Writes a `.ts` declaration for every wire and state type the dashboard
//! consumes, including everything they reference. Run with an optional
//! output directory:
//!
//! ```bash
//! cargo run -p bs-protocol-ts -- web/src/types
//! ```

use bs_protocol::{GenerationRequest, PipelineRun, StreamEvent};
use ts_rs::TS;

fn main() -> anyhow::Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "bindings".to_string());

    StreamEvent::export_all_to(&out_dir)?;
    PipelineRun::export_all_to(&out_dir)?;
    GenerationRequest::export_all_to(&out_dir)?;

    println!("TypeScript bindings written to {out_dir}");
    Ok(())
}
