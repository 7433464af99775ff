use super::GenerateArgs;

/// Print every discovered entry point with its build context.
pub fn discover(args: GenerateArgs) -> anyhow::Result<()> {
    let run = args.into_run()?;
    let entry_points = dockergen_core::discover(&run.root, &run.filter)?;

    for entry_point in &entry_points {
        println!("{entry_point}\t{}", entry_point.context().as_str());
    }
    tracing::info!(count = entry_points.len(), "discovery complete");
    Ok(())
}
