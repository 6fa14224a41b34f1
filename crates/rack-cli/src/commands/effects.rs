//! Effect listing and information command.

#![allow(clippy::print_literal)]

use clap::Args;
use rack_registry::{EffectCategory, EffectRegistry};

#[derive(Args)]
pub struct EffectsArgs {
    /// Show details for a specific effect
    #[arg(value_name = "EFFECT")]
    effect: Option<String>,
}

pub fn run(args: EffectsArgs) -> anyhow::Result<()> {
    let registry = EffectRegistry::new();

    if let Some(id) = &args.effect {
        let desc = registry.descriptor(id)?;
        let kernel = registry.create(id, 48000.0)?;

        println!("{} ({})", desc.name, desc.id);
        println!("{}", "=".repeat(desc.name.len() + desc.id.len() + 3));
        println!();
        println!("{}", desc.description);
        println!();

        if kernel.effect_param_count() == 0 {
            println!("No editable parameters.");
            return Ok(());
        }

        println!("Parameters (saved under [{}]):", desc.editor_tag);
        println!();
        println!("  {:16}  {:14}  {:12}  {}", "Key", "Name", "Default", "Range");
        println!("  {:16}  {:14}  {:12}  {}", "---", "----", "-------", "-----");
        for i in 0..kernel.effect_param_count() {
            if let Some(p) = kernel.effect_param_info(i) {
                println!(
                    "  {:16}  {:14}  {:12}  {} .. {}",
                    p.string_id,
                    p.name,
                    p.format_value(p.default),
                    p.format_value(p.min),
                    p.format_value(p.max)
                );
            }
        }
        return Ok(());
    }

    for category in [EffectCategory::Utility, EffectCategory::TimeBased] {
        let effects = registry.effects_in_category(category);
        if effects.is_empty() {
            continue;
        }
        println!("{}:", category.name());
        for desc in effects {
            println!("  {:12}  {}", desc.id, desc.description);
        }
        println!();
    }
    println!("Use 'rack effects <EFFECT>' for parameter details.");
    Ok(())
}
