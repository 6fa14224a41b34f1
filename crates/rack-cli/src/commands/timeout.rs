//! Decay time to buffer count.

use clap::Args;
use rack_core::{DECAY_MAX_MS, DECAY_MIN_MS, buffer_count};

#[derive(Args)]
pub struct TimeoutArgs {
    /// Decay time in milliseconds (clamped to 1-8000)
    #[arg(long, default_value = "100")]
    decay_ms: f32,

    /// Sample rate in Hz (default: user config, then 48000)
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Frames per host buffer (default: user config, then 256)
    #[arg(long)]
    frames: Option<u32>,
}

pub fn run(args: TimeoutArgs) -> anyhow::Result<()> {
    let audio = super::resolve_audio_config(args.sample_rate, args.frames)?;
    let decay = args.decay_ms.clamp(DECAY_MIN_MS, DECAY_MAX_MS);
    if decay != args.decay_ms {
        tracing::warn!(requested = args.decay_ms, used = decay, "decay clamped");
    }

    let buffers = buffer_count(decay, audio.sample_rate, audio.frames_per_buffer);
    let seconds = f64::from(buffers) * f64::from(audio.frames_per_buffer)
        / f64::from(audio.sample_rate);

    println!(
        "{decay} ms at {} Hz / {} frames: {buffers} buffers ({:.1} ms of audio)",
        audio.sample_rate,
        audio.frames_per_buffer,
        seconds * 1000.0
    );
    Ok(())
}
