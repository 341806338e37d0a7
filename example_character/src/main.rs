//! Example Character - A command-line character sheet demonstrating bonus_core
//!
//! This demo shows:
//! - Building a character with ability scores, defenses, and derived stats
//! - Attaching built-in bonus definitions loaded from TOML
//! - A randomly enchanted item (rand)
//! - An ability with a usage requirement
//! - Tracing an update pass with an UpdateObserver
//! - Exporting a score breakdown as JSON (serde_json)

use bonus_core::prelude::*;
use rand::prelude::*;

/// Prints each source as the update pass commits it
struct TraceObserver {
    step: usize,
}

impl UpdateObserver for TraceObserver {
    fn source_updated(&mut self, _id: SourceId, name: &str) {
        self.step += 1;
        println!("  {:>2}. {}", self.step, name);
    }
}

struct Sheet {
    character: Character,
    strength: SourceId,
    dexterity: SourceId,
    constitution: SourceId,
    armor_class: SourceId,
    fortitude: SourceId,
    reflex: SourceId,
    will: SourceId,
    hit_points: SourceId,
    initiative: SourceId,
    melee_attack: SourceId,
}

fn build_sheet() -> Sheet {
    let mut character = Character::new("Keth of the Vale", 5);
    let strength = character.add_score("Strength", "STR", 16);
    let dexterity = character.add_score("Dexterity", "DEX", 12);
    let constitution = character.add_score("Constitution", "CON", 14);
    let armor_class = character.add_score("Armor Class", "AC", 10);
    let fortitude = character.add_score("Fortitude", "FORT", 10);
    let reflex = character.add_score("Reflex", "REF", 10);
    let will = character.add_score("Will", "WILL", 10);
    let hit_points = character.add_score("Hit Points", "HP", 20);
    let initiative = character.add_score("Initiative", "INIT", 0);
    let melee_attack = character.add_score("Melee Attack", "ATK", 0);

    // Derived stats: (score - 10) / 2, reading already-committed totals.
    character.attach(
        DerivedBonus::new("Strength modifier", "STR mod", strength, melee_attack)
            .with_offset(-10)
            .with_divisor(2),
    );
    character.attach(
        DerivedBonus::new("Dexterity modifier", "DEX mod", dexterity, initiative)
            .with_offset(-10)
            .with_divisor(2),
    );
    character.attach(
        DerivedBonus::new("Constitution modifier", "CON mod", constitution, hit_points)
            .with_offset(-10)
            .with_divisor(2),
    );

    Sheet {
        character,
        strength,
        dexterity,
        constitution,
        armor_class,
        fortitude,
        reflex,
        will,
        hit_points,
        initiative,
        melee_attack,
    }
}

fn print_score(character: &Character, id: SourceId) {
    let Some(breakdown) = character.breakdown(id) else {
        return;
    };
    println!(
        "  {:<14} {:>3}  (base {})",
        breakdown.name, breakdown.total, breakdown.base
    );
    for line in &breakdown.modifiers {
        match &line.condition {
            Some(condition) => {
                println!("      {:+} {} ({})", line.value, line.source, condition)
            }
            None => println!("      {:+} {}", line.value, line.source),
        }
    }
}

fn main() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut sheet = build_sheet();

    // Built-in items from config/bonuses.toml.
    println!("Attaching built-in bonuses:");
    for def in default_bonuses() {
        match def.instantiate(&sheet.character) {
            Ok(bonus) => {
                println!("  + {}", def.name);
                sheet.character.attach(bonus);
            }
            Err(e) => eprintln!("  skipping '{}': {}", def.name, e),
        }
    }

    // A randomly enchanted sword.
    let enchantment = rng.gen_range(1..=3);
    println!("\nFound a +{enchantment} sword!");
    sheet.character.attach(
        FlatBonus::new(format!("Longsword +{enchantment}"), "SWD")
            .with_modifier(sheet.melee_attack, enchantment),
    );

    // An ability that needs Strength 15.
    let power_attack = sheet.character.attach(
        Ability::new("Power Attack", "PA")
            .with_requirement(sheet.strength, 15)
            .with_conditional_modifier(sheet.melee_attack, -2, "when used")
            .with_description("Trade accuracy for raw force."),
    );

    println!("\nUpdate pass:");
    let mut observer = TraceObserver { step: 0 };
    let report = match sheet.character.update_with_observer(&mut observer) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("update failed: {e}");
            std::process::exit(1);
        }
    };

    println!(
        "\n{} (level {})",
        sheet.character.name(),
        sheet.character.level()
    );
    for id in [
        sheet.strength,
        sheet.dexterity,
        sheet.constitution,
        sheet.armor_class,
        sheet.fortitude,
        sheet.reflex,
        sheet.will,
        sheet.hit_points,
        sheet.initiative,
        sheet.melee_attack,
    ] {
        print_score(&sheet.character, id);
    }

    if sheet.character.is_usable(power_attack) {
        println!("\nPower Attack is ready.");
    }
    for (id, reason) in &report.unusable {
        println!("\nUnusable: {} ({reason})", sheet.character.display_name(*id));
    }

    if let Some(breakdown) = sheet.character.breakdown(sheet.melee_attack) {
        match serde_json::to_string_pretty(&breakdown) {
            Ok(json) => println!("\nMelee Attack as JSON:\n{json}"),
            Err(e) => eprintln!("serialization failed: {e}"),
        }
    }
}
