use dockergen_build::dockerfile::{builder_context, must_gather_context};
use dockergen_build::rpms_lock::write_rpms_lock_file;
use dockergen_build::template::{self, project_template};
use dockergen_build::{
    DescriptorRenderer, EmbeddedTemplates, PackageInstructions, ProjectDescriptor, RenderError,
    TemplateContext,
};
use dockergen_core::metadata::{OcpVersion, ProjectSection, Requirements};
use dockergen_core::{EntryPoint, ProjectMetadata, TemplateName};
use tempfile::TempDir;

const BUILDER: &str =
    "registry.ci.openshift.org/openshift/release:rhel-8-release-golang-1.22-openshift-4.17";

fn serving_meta() -> ProjectMetadata {
    ProjectMetadata {
        project: ProjectSection {
            tag: "knative-v1.8".to_owned(),
            image_prefix: "knative-serving".to_owned(),
            version: "1.35.0".to_owned(),
        },
        requirements: Requirements {
            ocp_version: OcpVersion {
                min: "4.15".to_owned(),
            },
        },
    }
}

fn renderer() -> DescriptorRenderer<EmbeddedTemplates> {
    DescriptorRenderer::new(EmbeddedTemplates)
}

fn render_project(
    entry_point: &str,
    meta: &ProjectMetadata,
    instructions: &[String],
    template: TemplateName,
) -> String {
    let descriptor = ProjectDescriptor::new(BUILDER, "/usr/bin/%s", meta, instructions);
    let ctx = descriptor.context(&EntryPoint::new(entry_point)).unwrap();
    renderer()
        .render_to_string(project_template(template), &ctx)
        .unwrap()
}

// ── Project descriptor context ──

#[test]
fn project_context_carries_every_variable() {
    let meta = serving_meta();
    let descriptor = ProjectDescriptor::new(BUILDER, "/usr/bin/%s", &meta, &[]);
    let ctx = descriptor
        .context(&EntryPoint::new("cmd/queue_proxy"))
        .unwrap();

    assert_eq!(ctx.get_str("main"), Some("cmd/queue_proxy"));
    assert_eq!(ctx.get_str("app_file"), Some("/usr/bin/queue_proxy"));
    assert_eq!(ctx.get_str("builder"), Some(BUILDER));
    assert_eq!(ctx.get_str("version"), Some("knative-v1.8"));
    assert_eq!(ctx.get_str("project"), Some("Serving "));
    assert_eq!(ctx.get_str("project_dashcase"), Some("serving-"));
    assert_eq!(ctx.get_str("component"), Some("Queue Proxy"));
    assert_eq!(ctx.get_str("component_dashcase"), Some("queue-proxy"));
    assert!(ctx.get("additional_instructions").is_some());
}

#[test]
fn project_context_without_prefix_has_empty_project() {
    let meta = ProjectMetadata::default();
    let descriptor = ProjectDescriptor::new(BUILDER, "/usr/bin/%s", &meta, &[]);
    let ctx = descriptor.context(&EntryPoint::new("cmd/controller")).unwrap();

    assert_eq!(ctx.get_str("project"), Some(""));
    assert_eq!(ctx.get_str("project_dashcase"), Some(""));
    assert_eq!(ctx.get_str("version"), Some(""));
}

#[test]
fn project_context_multiword_prefix() {
    let mut meta = serving_meta();
    meta.project.image_prefix = "knative-eventing-kafka-broker".to_owned();
    let descriptor = ProjectDescriptor::new(BUILDER, "/usr/bin/%s", &meta, &[]);
    let ctx = descriptor.context(&EntryPoint::new("cmd/receiver")).unwrap();

    assert_eq!(ctx.get_str("project"), Some("Eventing Kafka Broker "));
    assert_eq!(ctx.get_str("project_dashcase"), Some("eventing-kafka-broker-"));
}

#[test]
fn project_context_rejects_bad_app_file_format() {
    let meta = serving_meta();
    let descriptor = ProjectDescriptor::new(BUILDER, "/usr/bin/app", &meta, &[]);
    assert!(descriptor.context(&EntryPoint::new("cmd/controller")).is_err());
}

// ── Embedded templates ──

#[test]
fn default_template_renders_program_image() {
    let out = render_project("cmd/controller", &serving_meta(), &[], TemplateName::Default);

    assert!(out.contains(&format!("ARG GO_BUILDER={BUILDER}")));
    assert!(out.contains("go build -tags strictfipsruntime -o /usr/bin/main ./cmd/controller"));
    assert!(out.contains("COPY --from=builder /usr/bin/main /usr/bin/controller"));
    assert!(out.contains("ARG VERSION=knative-v1.8"));
    assert!(out.contains("openshift-serverless-1/serving-controller-rhel8"));
    assert!(out.contains("Red Hat OpenShift Serverless 1 Serving Controller"));
    assert!(out.contains("ENTRYPOINT [\"/usr/bin/controller\"]"));
    assert!(!out.contains("microdnf install"));
}

#[test]
fn default_template_includes_additional_instructions() {
    let instructions = PackageInstructions::from_packages(&["tzdata".to_owned(), "git".to_owned()]);
    let out = render_project(
        "cmd/controller",
        &serving_meta(),
        &instructions.instructions,
        TemplateName::Default,
    );

    let reinstall = out
        .find("RUN microdnf update tzdata -y && microdnf reinstall tzdata -y\n")
        .unwrap();
    let install = out.find("RUN microdnf install git\n").unwrap();
    let copy = out.find("COPY --from=builder").unwrap();
    assert!(reinstall < install && install < copy);
}

#[test]
fn func_util_template_renders() {
    let out = render_project(
        "cmd/func-util",
        &serving_meta(),
        &[],
        TemplateName::FuncUtil,
    );
    assert!(out.contains("/usr/local/bin/deploy"));
    assert!(out.contains("ENTRYPOINT [\"/usr/bin/func-util\"]"));
}

#[test]
fn builder_and_source_templates_render() {
    let ctx = builder_context(BUILDER);
    let build = renderer()
        .render_to_string(template::BUILD_IMAGE, &ctx)
        .unwrap();
    let source = renderer()
        .render_to_string(template::SOURCE_IMAGE, &ctx)
        .unwrap();

    assert!(build.contains(&format!("FROM {BUILDER}")));
    assert!(source.starts_with("FROM src"));
}

#[test]
fn project_template_fails_with_builder_only_context() {
    let ctx = builder_context(BUILDER);
    let err = renderer()
        .render_to_string(template::DEFAULT, &ctx)
        .unwrap_err();
    assert!(matches!(err, RenderError::Template { .. }));
}

// ── Must-gather ──

#[test]
fn must_gather_context_uses_rhel_suffixed_oc() {
    let ctx = must_gather_context(&serving_meta()).unwrap();

    assert_eq!(ctx.get_str("main"), Some("must-gather"));
    assert_eq!(
        ctx.get_str("oc_cli_artifacts"),
        Some("registry.ci.openshift.org/ocp/4.15:cli-artifacts")
    );
    assert_eq!(ctx.get_str("oc_binary_name"), Some("oc.rhel9"));
    assert_eq!(ctx.get_str("version"), Some("1.35.0"));
    assert_eq!(ctx.get_str("project"), Some("Must Gather"));
    assert_eq!(ctx.get_str("project_dashcase"), Some("must-gather-"));
}

#[test]
fn must_gather_context_plain_oc_up_to_4_14() {
    let mut meta = serving_meta();
    meta.requirements.ocp_version.min = "4.14".to_owned();
    let ctx = must_gather_context(&meta).unwrap();
    assert_eq!(ctx.get_str("oc_binary_name"), Some("oc"));
}

#[test]
fn must_gather_context_requires_ocp_version() {
    let mut meta = serving_meta();
    meta.requirements.ocp_version.min = String::new();
    assert!(must_gather_context(&meta).is_err());
}

#[test]
fn must_gather_template_renders() {
    let ctx = must_gather_context(&serving_meta()).unwrap();
    let out = renderer()
        .render_to_string(template::MUST_GATHER, &ctx)
        .unwrap();

    assert!(out.contains("FROM registry.ci.openshift.org/ocp/4.15:cli-artifacts as oc-cli"));
    assert!(out.contains("linux_$TARGETARCH/oc.rhel9 /usr/bin/oc"));
    assert!(out.contains("openshift-serverless-1/must-gather-rhel8"));
}

// ── Writing descriptors ──

#[test]
fn render_writes_dockerfile_and_returns_absolute_path() {
    let tmp = TempDir::new().unwrap();
    let dest = tmp.path().join("ci-operator/build-image");

    let path = renderer()
        .render(template::BUILD_IMAGE, &builder_context(BUILDER), &dest)
        .unwrap();

    assert!(path.is_absolute());
    assert_eq!(path, dest.join("Dockerfile"));
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains(BUILDER));
}

#[test]
fn render_replaces_previous_directory_contents() {
    let tmp = TempDir::new().unwrap();
    let dest = tmp.path().join("controller");
    std::fs::create_dir_all(dest.join("stale")).unwrap();
    std::fs::write(dest.join("Dockerfile.old"), "FROM old").unwrap();

    renderer()
        .render(template::BUILD_IMAGE, &builder_context(BUILDER), &dest)
        .unwrap();

    let entries: Vec<_> = std::fs::read_dir(&dest)
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("Dockerfile")]);
}

#[test]
fn render_failure_leaves_destination_untouched() {
    let tmp = TempDir::new().unwrap();
    let dest = tmp.path().join("controller");
    std::fs::create_dir_all(&dest).unwrap();
    std::fs::write(dest.join("Dockerfile"), "FROM previous\n").unwrap();

    let result = renderer().render(template::DEFAULT, &TemplateContext::new(), &dest);

    assert!(result.is_err());
    assert_eq!(
        std::fs::read_to_string(dest.join("Dockerfile")).unwrap(),
        "FROM previous\n"
    );
}

#[test]
fn rerender_is_byte_identical() {
    let tmp = TempDir::new().unwrap();
    let dest = tmp.path().join("controller");
    let meta = serving_meta();
    let descriptor = ProjectDescriptor::new(BUILDER, "/usr/bin/%s", &meta, &[]);
    let ctx = descriptor.context(&EntryPoint::new("cmd/controller")).unwrap();

    let path = renderer().render(template::DEFAULT, &ctx, &dest).unwrap();
    let first = std::fs::read(&path).unwrap();
    let path = renderer().render(template::DEFAULT, &ctx, &dest).unwrap();
    let second = std::fs::read(&path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn rpms_lock_file_is_written_to_root() {
    let tmp = TempDir::new().unwrap();

    let path = write_rpms_lock_file(&renderer(), tmp.path()).unwrap();

    assert_eq!(path, tmp.path().join("rpms.lock.yaml"));
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("lockfileVersion: 1"));
}
