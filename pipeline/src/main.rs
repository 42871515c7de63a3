use anyhow::Result;
use clusterview::ParamGuard;
use clusterview_pipeline::{run, PipelineParams};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let params = PipelineParams::default().check()?;
    let report = run(&params, &mut std::io::stdout())?;
    log::debug!(
        "{} points in {} clusters, {:.1}% of the variance shown",
        report.npoints,
        report.clusters.len(),
        100. * report.total_explained_variance()
    );

    Ok(())
}
