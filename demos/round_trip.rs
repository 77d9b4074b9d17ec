//! Round Trip Example
//!
//! Enciphers a message, deciphers it on a second machine set to the same
//! key, and shows the rotor windows before and after.
//!
//! # Running
//! ```bash
//! cargo run --example round_trip
//! ```

use enigmatic::prelude::*;

fn main() -> EnigmaResult<()> {
    println!("=== Enigma Round Trip ===\n");

    // 1. Fixed key
    println!("1. Operator key:");
    let config = MachineConfig::builder()
        .rotors([RotorType::I, RotorType::II, RotorType::III])
        .reflector(ReflectorType::B)
        .window("ADU")
        .rings("AAA")
        .plugboard("AB CD EF")
        .build();
    println!("{}", config.to_yaml()?);

    let plaintext = "WETTERBERICHT FUER DIE NORDSEE";
    let mut sender = EnigmaMachine::new(config.clone())?;
    let ciphertext = sender.process(plaintext);
    println!("   Plaintext:  {plaintext}");
    println!("   Ciphertext: {ciphertext}");
    println!("   Window: {} -> {}\n", config.window(), sender.window());

    let mut receiver = EnigmaMachine::new(config)?;
    let decrypted = receiver.process(&ciphertext);
    println!("   Deciphered: {decrypted}");
    println!("   Recovered: {}\n", decrypted == plaintext);

    // 2. Double step
    println!("2. Double stepping from ADU:");
    let mut machine = EnigmaMachine::from_settings(&["I", "II", "III"], [0, 3, 20], [0, 0, 0], &[])?;
    for _ in 0..3 {
        machine.step_rotors();
        println!("   {}", machine.window());
    }
    println!();

    // 3. Seeded key sheet
    println!("3. Key sheet from seed 0x5EED:");
    let mut keys = KeyRng::new(0x5EED);
    for day in 1..=3 {
        let key = keys.daily_key();
        let rotors: Vec<String> = key.rotors.iter().map(ToString::to_string).collect();
        println!(
            "   Day {day}: rotors {} window {} plugs {}",
            rotors.join("-"),
            key.window(),
            key.plugboard.pairs.join(" ")
        );
    }

    Ok(())
}
