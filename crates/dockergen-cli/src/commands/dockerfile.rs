use std::collections::BTreeMap;
use std::path::PathBuf;

use dockergen_build::dockerfile::builder_context;
use dockergen_build::rpms_lock::write_rpms_lock_file;
use dockergen_build::template::{self, project_template};
use dockergen_build::{DescriptorRenderer, EmbeddedTemplates, PackageInstructions, ProjectDescriptor};
use dockergen_core::{
    BuildContext, EntryPoint, GoModule, OutputConfig, ProjectMetadata, TemplateName, format,
    version,
};
use dockergen_registry::{
    ExternalMerger, ImageMapping, ImageResolver, MAPPING_FILE_NAME, ProcessEnv,
};

use super::{GenerateArgs, Run};

/// Execute the full generation pipeline: shared descriptors, one descriptor
/// per entry point, local image mapping, external merge, `images.yaml`.
pub async fn dockerfile(args: GenerateArgs) -> anyhow::Result<()> {
    let run = args.into_run()?;
    let config = &run.config;

    let entry_points = dockergen_core::discover(&run.root, &run.filter)?;
    let routes = route(&run, &entry_points)?;

    let module = GoModule::read(&run.root)?;
    let builder_image = format::fill_optional(
        &config.images.builder_image_fmt,
        version::builder_go_version(&module.go_version),
    );
    let metadata = ProjectMetadata::read_optional(&config.output.project_file(&run.root))?
        .unwrap_or_default();

    let renderer = DescriptorRenderer::new(EmbeddedTemplates);

    let shared = builder_context(&builder_image);
    renderer.render(
        template::BUILD_IMAGE,
        &shared,
        &run.output_dir(&config.output.dockerfile_build_dir),
    )?;
    renderer.render(
        template::SOURCE_IMAGE,
        &shared,
        &run.output_dir(&config.output.dockerfile_source_dir),
    )?;

    let packages = PackageInstructions::from_packages(&config.dockerfile.additional_packages);
    let descriptor = ProjectDescriptor::new(
        &builder_image,
        &config.images.app_file_fmt,
        &metadata,
        &packages.instructions,
    );
    let resolver = ImageResolver::new(
        &config.images.registry_image_fmt,
        &metadata.project.tag,
        &metadata.project.image_prefix,
        &module.path,
        ProcessEnv,
    );
    let project_template_name = project_template(config.dockerfile.template);

    let mut mapping = ImageMapping::new();
    for (entry_point, destination) in &routes {
        let context = descriptor.context(entry_point)?;
        let path = renderer.render(project_template_name, &context, destination)?;
        let image = resolver.resolve(entry_point, &path)?;
        tracing::info!(
            entry_point = %entry_point,
            image = %image.reference,
            context = entry_point.context().as_str(),
            "generated descriptor"
        );
        mapping.insert_local(image.identity, image.reference)?;
    }

    if config.dockerfile.rpms_lock_file
        || packages.requires_lock_file
        || config.dockerfile.template == TemplateName::FuncUtil
    {
        write_rpms_lock_file(&renderer, &run.root)?;
    }

    let added = ExternalMerger::new()
        .merge(
            &config.images.images_from,
            &metadata,
            &config.images.images_from_url_fmt,
            &mut mapping,
        )
        .await?;

    let manifest = run.output().join(MAPPING_FILE_NAME);
    mapping.write(&manifest)?;

    println!(
        "Generated {} Dockerfiles, {} images ({added} external) in {}",
        routes.len(),
        mapping.len(),
        manifest.display()
    );
    Ok(())
}

/// Destination directory of every entry point, checked for collisions
/// before anything is written.
fn route<'a>(
    run: &Run,
    entry_points: &'a std::collections::BTreeSet<EntryPoint>,
) -> anyhow::Result<Vec<(&'a EntryPoint, PathBuf)>> {
    let mut claimed: BTreeMap<PathBuf, &EntryPoint> = BTreeMap::new();
    let mut routes = Vec::with_capacity(entry_points.len());

    for entry_point in entry_points {
        let destination = run.output_dir(&descriptor_dir(&run.config.output, entry_point));
        if let Some(previous) = claimed.insert(destination.clone(), entry_point) {
            anyhow::bail!(
                "entry points {previous} and {entry_point} both generate {}; \
                 adjust the filters to select only one of them",
                destination.display()
            );
        }
        routes.push((entry_point, destination));
    }
    Ok(routes)
}

/// Descriptor directory of an entry point, relative to the output root.
fn descriptor_dir(output: &OutputConfig, entry_point: &EntryPoint) -> PathBuf {
    let base = match entry_point.context() {
        BuildContext::Production => &output.dockerfile_dir,
        BuildContext::Test => &output.dockerfile_test_dir,
    };
    base.join(entry_point.names().binary_filename)
}
