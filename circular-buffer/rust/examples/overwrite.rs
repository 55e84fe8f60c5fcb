use circular_buffer::{RingBuffer, RingBufferError};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// Last few readings from a sampled signal, oldest ones fall off the front
const WINDOW: usize = 8;

fn main() -> Result<(), RingBufferError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")))
        .init();

    let mut samples = RingBuffer::<f32, WINDOW>::new_inline();

    for i in 0..12u8 {
        let sample = f32::from(i).sin();
        if !samples.push_back(sample) {
            warn!(sample, "window full, dropped oldest sample");
        }
    }

    let mean = (0..samples.len()).map(|i| samples[i]).sum::<f32>() / samples.len() as f32;
    info!(len = samples.len(), available = samples.available(), mean, "window summary");

    let oldest = samples.pop_front()?;
    let newest = samples.pop_back()?;
    info!(oldest, newest, "popped both ends");

    samples.clear();
    match samples.front() {
        Err(err) => info!(%err, "cleared"),
        Ok(value) => warn!(value, "buffer should be empty after clear"),
    }

    Ok(())
}
