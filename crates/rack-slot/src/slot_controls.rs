//! The four user-facing controls every slot carries.
//!
//! Each control owns a [`ParamDescriptor`]; setters clamp through it.

use rack_core::{DECAY_MAX_MS, DECAY_MIN_MS, ParamDescriptor, ParamUnit};

/// A slot control: range metadata plus the text shown next to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotControl {
    /// Range, step, default and labels.
    pub descriptor: ParamDescriptor,
    /// Prefix shown with the current value, e.g. `"Wet Level:"`.
    pub hint: &'static str,
    /// Longer explanation for context help.
    pub help: &'static str,
}

/// On/off switch. Stored inverted as the bypass flag.
pub const ON: SlotControl = SlotControl {
    descriptor: ParamDescriptor {
        name: "On/Off",
        short_name: "On",
        unit: ParamUnit::None,
        min: 0.0,
        max: 1.0,
        default: 1.0,
        step: 1.0,
        string_id: "on",
    },
    hint: "On/Off",
    help: "Turns the effect on or off. While off, input passes through untouched.",
};

/// Wet/dry mix.
pub const WET: SlotControl = SlotControl {
    descriptor: ParamDescriptor {
        name: "Wet/Dry mix",
        short_name: "W/D",
        unit: ParamUnit::Ratio,
        min: 0.0,
        max: 1.0,
        default: 1.0,
        step: 0.01,
        string_id: "wet",
    },
    hint: "Wet Level:",
    help: "Balance between the slot's input and the processed signal in its output.",
};

/// Decay time before auto-quit.
pub const DECAY: SlotControl = SlotControl {
    descriptor: ParamDescriptor {
        name: "Decay",
        short_name: "Decay",
        unit: ParamUnit::Milliseconds,
        min: DECAY_MIN_MS,
        max: DECAY_MAX_MS,
        default: DECAY_MIN_MS,
        step: 100.0,
        string_id: "autoquit",
    },
    hint: "Time:",
    help: "How long the output must stay below the gate before the effect stops \
           processing. Short times save CPU but can cut off the tail of delays.",
};

/// Silence threshold for auto-quit.
pub const GATE: SlotControl = SlotControl {
    descriptor: ParamDescriptor {
        name: "Gate",
        short_name: "Gate",
        unit: ParamUnit::Ratio,
        min: 0.0,
        max: 1.0,
        default: 0.0,
        step: 0.01,
        string_id: "gate",
    },
    hint: "Gate:",
    help: "Signal level treated as silence when deciding to stop processing.",
};

/// All slot controls in display order.
pub const ALL: [SlotControl; 4] = [ON, WET, DECAY, GATE];

/// Help text for the slot as a whole.
pub const SLOT_HELP: &str = "\
Effect slots form a chain. Signal flows through them from first to last.

On/Off bypasses the slot without removing it.

Wet/Dry mixes the slot's input with its processed output. A slot's input is \
the output of the slot before it, so its dry signal already carries every \
earlier effect.

Decay sets how long processing continues once the signal has gone quiet. \
When the output stays below the gate for this long, the effect stops until \
louder input arrives. Longer times cost more CPU. Raise it for effects with \
long tails such as echoes.

Gate sets the level below which output counts as quiet. The decay clock \
starts as soon as the output falls under it.

Controls opens the effect's own parameter editor.

The context menu moves the slot earlier or later in the chain, or removes it.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_inside_ranges() {
        for control in ALL {
            let d = control.descriptor;
            assert!(d.min <= d.default && d.default <= d.max, "{}", d.name);
            assert!(d.step > 0.0, "{}", d.name);
        }
    }

    #[test]
    fn keys_match_saved_attributes() {
        use rack_config::attrs::slot_keys;
        assert_eq!(ON.descriptor.string_id, slot_keys::ON);
        assert_eq!(WET.descriptor.string_id, slot_keys::WET);
        assert_eq!(DECAY.descriptor.string_id, slot_keys::AUTOQUIT);
        assert_eq!(GATE.descriptor.string_id, slot_keys::GATE);
    }

    #[test]
    fn clamping() {
        assert_eq!(WET.descriptor.clamp(-0.5), 0.0);
        assert_eq!(WET.descriptor.clamp(1.7), 1.0);
        assert_eq!(GATE.descriptor.clamp(2.0), 1.0);
        assert_eq!(DECAY.descriptor.clamp(0.0), DECAY_MIN_MS);
        assert_eq!(DECAY.descriptor.clamp(1.0e6), DECAY_MAX_MS);
    }
}
