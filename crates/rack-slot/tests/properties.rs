//! Property tests for slot controls and persistence.

use proptest::prelude::*;
use rack_config::Element;
use rack_slot::{EffectSlotController, HostContext, audio_port, event_channel};

fn controller() -> EffectSlotController {
    let (port, _proc) = audio_port();
    let (tx, _rx) = event_channel();
    EffectSlotController::new("echo", &HostContext::default(), port, tx).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Any finite input lands inside each control's range.
    #[test]
    fn setters_always_clamp(
        wet in -10.0f32..10.0,
        gate in -10.0f32..10.0,
        decay in -1.0e5f32..1.0e5,
    ) {
        let mut c = controller();
        c.set_wet_level(wet);
        c.set_gate(gate);
        c.set_decay(decay);
        prop_assert!((0.0..=1.0).contains(&c.wet_level()));
        prop_assert!((0.0..=1.0).contains(&c.gate_level()));
        prop_assert!((1.0..=8000.0).contains(&c.decay_ms()));
        prop_assert!(c.timeout_buffers() >= 1);
    }

    /// Saving and restoring reproduces the scalar state.
    #[test]
    fn save_restore_reproduces_scalars(
        bypassed in any::<bool>(),
        wet in 0.0f32..=1.0,
        gate in 0.0f32..=1.0,
        decay in 1.0f32..=8000.0,
    ) {
        let mut a = controller();
        a.set_bypassed(bypassed);
        a.set_wet_level(wet);
        a.set_gate(gate);
        a.set_decay(decay);
        let saved = a.save_state();

        let mut b = controller();
        b.restore_state(&saved);
        prop_assert_eq!(b.bypassed(), bypassed);
        prop_assert_eq!(b.wet_level(), a.wet_level());
        prop_assert_eq!(b.gate_level(), a.gate_level());
        prop_assert_eq!(b.decay_ms(), a.decay_ms());
        prop_assert_eq!(b.timeout_buffers(), a.timeout_buffers());
    }

    /// Garbage attribute values never change state.
    #[test]
    fn garbage_attributes_ignored(garbage in "[a-z]{1,8}") {
        prop_assume!(garbage != "true" && garbage != "false" && garbage != "inf" && garbage != "nan");
        let mut c = controller();
        c.set_wet_level(0.4);
        let before = (c.bypassed(), c.wet_level(), c.gate_level(), c.decay_ms());
        let saved = Element::new("slot")
            .with_attribute("on", &garbage)
            .with_attribute("wet", &garbage)
            .with_attribute("gate", &garbage)
            .with_attribute("autoquit", &garbage);
        c.restore_state(&saved);
        prop_assert_eq!(before, (c.bypassed(), c.wet_level(), c.gate_level(), c.decay_ms()));
    }
}
