use anyhow::Context;
use rust_decimal_macros::dec;
use tracing::info;

use poolsim::config::{LoggingConfig, SimulationConfig};
use poolsim::domain::{StdSource, WeightedDistribution};
use poolsim::engine::{SimulationEngine, SimulationParams};
use poolsim::report::Reporter;
use poolsim::risk::{self, scenario};

fn main() {
    LoggingConfig::default().init();
    info!("poolsim starting");

    if let Err(e) = run() {
        if let Some(invalid) = e.downcast_ref::<poolsim::error::InvalidParameter>() {
            Reporter::default().print_config_error(invalid);
        } else {
            eprintln!("error: {e:#}");
        }
        std::process::exit(1);
    }

    info!("poolsim stopped");
}

fn run() -> anyhow::Result<()> {
    let config = SimulationConfig::default();
    let threshold = config.limits.circuit_breaker_threshold;

    // Seed from entropy, but log it so the run can be replayed through
    // StdSource::seeded.
    let seed = rand::random::<u64>();
    info!(seed, "Random source seeded");
    let mut source = StdSource::seeded(seed);

    let reporter = Reporter::default();
    reporter.header(env!("CARGO_PKG_VERSION"));

    let engine = SimulationEngine::new(config).context("building simulation engine")?;
    let params = SimulationParams {
        round_count: 100_000,
        stake_per_round: dec!(100),
        leg_counts: WeightedDistribution::default_leg_mix()
            .context("building leg-count distribution")?,
    };

    let report = engine.run(&params, &mut source).context("running simulation")?;
    let assessment = risk::classify(&report, threshold);
    reporter.print_run(&report, &assessment);

    let model = engine.model();

    let whale = scenario::concentrated_max_leg_attack(model, 100, dec!(10000), &mut source)
        .context("running whale attack scenario")?;
    reporter.print_scenario(&whale, &risk::classify_scenario(&whale, threshold));

    let streak = scenario::simultaneous_rare_wins(model, 10, dec!(1000), 10)
        .context("running lucky streak scenario")?;
    reporter.print_scenario(&streak, &risk::classify_scenario(&streak, threshold));

    let max_bet = scenario::single_max_bet(model).context("running max bet scenario")?;
    reporter.print_scenario(&max_bet, &risk::classify_scenario(&max_bet, threshold));

    reporter.print_reserve_requirements(max_bet.total_paid_out, threshold);

    Ok(())
}
