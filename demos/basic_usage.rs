// ============================================================================
// Basic Usage Example
// ============================================================================

use demurrage_codec::prelude::*;
use rust_decimal::Decimal;

fn main() -> Result<(), NumericError> {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Demurrage Codec Example ===\n");

    // 2% of every balance decays away over one month
    let config = DemurrageConfig::monthly(Decimal::new(2, 2));
    let args = config.deployment_args()?;

    println!("Rate:        {}", config.demurrage_rate);
    println!("Period:      {}", args.period_minutes);
    println!("Decay level: {}", args.decay_level);
    println!("  as hex:    {}", args.decay_level.as_fixed().to_hex_string());
    println!("  as real:   {}", args.decay_level.decode());

    println!("\nConstructor words:");
    for word in args.abi_words() {
        println!("  0x{}", hex::encode(word));
    }

    // Reading a level back from a hex string, e.g. from a block explorer
    println!("\n=== Inverse ===");
    let fixed = parse_hex("0xfffff842f37337ff")?;
    let rate = calculate_demurrage_rate(DecayLevel::new(fixed)?, args.period_minutes)?;
    println!("Level {} over {} -> rate {}", fixed.decode(), args.period_minutes, rate);

    // A zero rate has no decay level
    println!("\n=== Rejected Input ===");
    match calculate_decay_level(DecayRate::new(0.0)?, PeriodMinutes::MONTH) {
        Ok(level) => println!("unexpected level {}", level),
        Err(err) => println!("rate 0: {}", err),
    }

    Ok(())
}
