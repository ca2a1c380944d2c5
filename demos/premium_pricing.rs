use log::LevelFilter;
use riskprice::{Dataset, fit_premium_model, synthetic_portfolio};
use simple_logger::SimpleLogger;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    println!("=== Insurance Premium Pricing ===\n");
    println!("Objectives: predict risk-adjusted premiums, identify risk drivers\n");

    // Step 1: Generate the synthetic portfolio
    let dataset = synthetic_portfolio(500, 42)?;
    println!(
        "Portfolio: {} policyholders, {} columns",
        dataset.n_samples(),
        dataset.n_columns()
    );

    println!("\nSynthetic risk data:");
    for name in ["Age", "Income", "HealthScore", "DrivingHistory", "RiskScore"] {
        let col = dataset.column(name)?;
        let min = col.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = col.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let mean = col.mean().unwrap();
        println!("  {name:>15}: min={min:>9.1}  mean={mean:>9.1}  max={max:>9.1}");
    }

    // Step 2: Fit the premium model
    let report = fit_premium_model(&dataset)?;

    println!("\nModel performance:");
    println!("  R² score: {:.3}", report.r_squared);
    println!("  RMSE:     {:.2}", report.rmse);
    println!("  MAE:      {:.2}", report.mae);

    println!("\nActual vs predicted premiums (first 5 policyholders):");
    let premium = dataset.column("Premium")?;
    for i in 0..5 {
        println!(
            "  #{:<3} actual={:>8.2}  predicted={:>8.2}  error={:>7.2}",
            i + 1,
            premium[i],
            report.predictions[i],
            (premium[i] - report.predictions[i]).abs()
        );
    }

    // Step 3: Sensitivity analysis - impact of each risk driver
    println!("\nImpact of risk drivers:");
    println!("  {:>15}: {:.4}", "Intercept", report.intercept);
    for (name, coeff) in report.feature_names.iter().zip(report.coefficients.iter()) {
        println!("  {name:>15}: {coeff:.4}");
    }

    // Step 4: Premium distribution across risk groups
    println!("\nMean premium by health score:");
    print_group_means(&dataset, "HealthScore", 1..10)?;

    println!("\nMean premium by driving history:");
    print_group_means(&dataset, "DrivingHistory", 0..5)?;

    Ok(())
}

fn print_group_means(
    dataset: &Dataset,
    group_column: &str,
    levels: std::ops::Range<i64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let group = dataset.column(group_column)?;
    let premium = dataset.column("Premium")?;

    for level in levels {
        let members: Vec<f64> = group
            .iter()
            .zip(premium.iter())
            .filter(|(&g, _)| g == level as f64)
            .map(|(_, &p)| p)
            .collect();

        if members.is_empty() {
            println!("  {group_column} {level}: (no policyholders)");
            continue;
        }

        let mean = members.iter().sum::<f64>() / members.len() as f64;
        println!(
            "  {group_column} {level}: mean premium {mean:>8.2} ({} policyholders)",
            members.len()
        );
    }

    Ok(())
}
