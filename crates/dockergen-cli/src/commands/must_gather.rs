use dockergen_build::dockerfile::{MUST_GATHER_NAME, must_gather_context};
use dockergen_build::rpms_lock::write_rpms_lock_file;
use dockergen_build::template;
use dockergen_build::{DescriptorRenderer, EmbeddedTemplates};
use dockergen_core::ProjectMetadata;

use super::GenerateArgs;

/// Generate the must-gather Dockerfile and the RPM lock file.
pub fn must_gather(args: GenerateArgs) -> anyhow::Result<()> {
    let run = args.into_run()?;

    let metadata = ProjectMetadata::read(&run.config.output.project_file(&run.root))?;
    let context = must_gather_context(&metadata)?;

    let renderer = DescriptorRenderer::new(EmbeddedTemplates);
    let destination = run
        .output_dir(&run.config.output.dockerfile_dir)
        .join(MUST_GATHER_NAME);
    let path = renderer.render(template::MUST_GATHER, &context, &destination)?;
    println!("Wrote {}", path.display());

    let lock = write_rpms_lock_file(&renderer, &run.root)?;
    println!("Wrote {}", lock.display());
    Ok(())
}
