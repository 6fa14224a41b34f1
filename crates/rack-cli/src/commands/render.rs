//! Render a tone burst through a rack and report when each slot auto-quits.

#![allow(clippy::print_literal)]

use std::f32::consts::TAU;
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use rack_config::{Element, find_slot_state, slot_save_path};
use rack_registry::EffectRegistry;
use rack_slot::{HostContext, PortProcessor, Rack, audio_port};

const TONE_HZ: f32 = 440.0;
const TONE_AMPLITUDE: f32 = 0.5;

#[derive(Args)]
pub struct RenderArgs {
    /// Effect to insert; repeat to build a chain in order
    #[arg(long = "effect", short = 'e', required = true, value_name = "EFFECT")]
    effects: Vec<String>,

    /// Wet/dry mix for every slot (0-1)
    #[arg(long)]
    wet: Option<f32>,

    /// Decay time for every slot in milliseconds (1-8000)
    #[arg(long)]
    decay_ms: Option<f32>,

    /// Silence gate for every slot (0-1)
    #[arg(long)]
    gate: Option<f32>,

    /// Bypass every slot
    #[arg(long)]
    bypass: bool,

    /// Restore every slot from a saved state file (path or name)
    #[arg(long, value_name = "FILE")]
    load: Option<String>,

    /// Save the first slot's state after applying settings (path, or a bare
    /// name stored in the user slots directory)
    #[arg(long, value_name = "FILE")]
    save: Option<String>,

    /// Total buffers to render
    #[arg(long, default_value = "200")]
    buffers: usize,

    /// Buffers of tone before silence
    #[arg(long, default_value = "4")]
    tone_buffers: usize,

    /// Sample rate in Hz (default: user config, then 48000)
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Frames per host buffer (default: user config, then 256)
    #[arg(long)]
    frames: Option<u32>,
}

/// Outcome for one slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotReport {
    pub label: &'static str,
    pub timeout_buffers: u32,
    pub bypassed: bool,
    /// First buffer after which the engine was no longer running.
    pub stopped_at: Option<usize>,
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let audio = super::resolve_audio_config(args.sample_rate, args.frames)?;
    let host = HostContext::new(audio, Arc::new(EffectRegistry::new()));
    let (port, mut processor) = audio_port();
    let mut rack = Rack::new(host, port);

    for id in &args.effects {
        rack.insert(id)?;
    }

    let restore = match &args.load {
        Some(name) => {
            let path = find_slot_state(name)
                .ok_or_else(|| anyhow::anyhow!("saved slot state not found: {name}"))?;
            Some(Element::load(&path)?)
        }
        None => None,
    };

    for id in rack.order() {
        let Some(slot) = rack.slot_mut(id) else {
            continue;
        };
        if let Some(element) = &restore {
            slot.restore_state(element);
        }
        if let Some(wet) = args.wet {
            slot.set_wet_level(wet);
        }
        if let Some(decay) = args.decay_ms {
            slot.set_decay(decay);
        }
        if let Some(gate) = args.gate {
            slot.set_gate(gate);
        }
        if args.bypass {
            slot.set_bypassed(true);
        }
    }

    if let Some(name) = &args.save
        && let Some(first) = rack.slots().next()
    {
        let path = slot_save_path(name)?;
        first
            .save_state()
            .save(&path)
            .with_context(|| format!("saving {}", first.identity()))?;
        tracing::info!(path = %path.display(), slot = first.identity(), "slot state saved");
    }

    tracing::info!(
        slots = rack.len(),
        buffers = args.buffers,
        sample_rate = audio.sample_rate,
        frames = audio.frames_per_buffer,
        "rendering"
    );
    let (reports, peak) = simulate(
        &rack,
        &mut processor,
        audio.sample_rate,
        audio.frames_per_buffer as usize,
        args.tone_buffers,
        args.buffers,
    );

    println!(
        "{:4}  {:8}  {:>8}  {}",
        "#", "Effect", "Timeout", "Stopped after buffer"
    );
    for (i, report) in reports.iter().enumerate() {
        let stopped = match (report.bypassed, report.stopped_at) {
            (true, _) => "bypassed".to_string(),
            (false, Some(b)) => b.to_string(),
            (false, None) => "still running".to_string(),
        };
        println!(
            "{:4}  {:8}  {:>8}  {}",
            i + 1,
            report.label,
            report.timeout_buffers,
            stopped
        );
    }
    println!();
    println!("Peak output: {peak:.4}");
    Ok(())
}

/// Feed `tone_buffers` of sine then silence through the chain, watching each
/// slot's running flag. Returns per-slot reports and the output peak.
pub fn simulate(
    rack: &Rack,
    processor: &mut PortProcessor,
    sample_rate: u32,
    frames: usize,
    tone_buffers: usize,
    total_buffers: usize,
) -> (Vec<SlotReport>, f32) {
    let mut reports: Vec<SlotReport> = rack
        .slots()
        .map(|s| SlotReport {
            label: s.label(),
            timeout_buffers: s.timeout_buffers(),
            bypassed: s.bypassed(),
            stopped_at: None,
        })
        .collect();

    let step = TAU * TONE_HZ / sample_rate as f32;
    let mut phase = 0.0f32;
    let mut block = vec![0.0f32; frames];
    let mut peak = 0.0f32;

    for n in 0..total_buffers {
        if n < tone_buffers {
            for sample in &mut block {
                *sample = TONE_AMPLITUDE * phase.sin();
                phase = (phase + step) % TAU;
            }
        } else {
            block.fill(0.0);
        }

        processor.process_block(&mut block);
        peak = block.iter().fold(peak, |p, &s| p.max(s.abs()));

        for (report, slot) in reports.iter_mut().zip(rack.slots()) {
            if report.stopped_at.is_none() && !slot.is_running() {
                report.stopped_at = Some(n);
            }
        }
    }

    (reports, peak)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rack_config::AudioConfig;

    fn rack(ids: &[&str]) -> (Rack, PortProcessor) {
        let host = HostContext::new(AudioConfig::new(48000, 256), Arc::new(EffectRegistry::new()));
        let (port, proc) = audio_port();
        let mut rack = Rack::new(host, port);
        for id in ids {
            rack.insert(id).unwrap();
        }
        (rack, proc)
    }

    #[test]
    fn short_decay_stops_right_after_tone() {
        let (rack, mut proc) = rack(&["amplifier"]);
        let (reports, peak) = simulate(&rack, &mut proc, 48000, 256, 4, 20);
        // Timeout 1: tone in 0..=3, quiet buffers 4 and 5, stopped after 5.
        assert_eq!(reports[0].timeout_buffers, 1);
        assert_eq!(reports[0].stopped_at, Some(5));
        assert!(peak > 0.4);
    }

    #[test]
    fn long_decay_keeps_running() {
        let (mut rack, mut proc) = rack(&["echo"]);
        let id = rack.order()[0];
        rack.slot_mut(id).unwrap().set_decay(8000.0);
        let (reports, _) = simulate(&rack, &mut proc, 48000, 256, 4, 20);
        assert_eq!(reports[0].stopped_at, None);
    }

    #[test]
    fn chain_reports_each_slot() {
        let (rack, mut proc) = rack(&["amplifier", "invert"]);
        let (reports, _) = simulate(&rack, &mut proc, 48000, 256, 2, 10);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[1].label, "Inv");
    }
}
