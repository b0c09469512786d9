//! Artifact catalog behavior.

use swarm_console::catalog::{Catalog, COMPOSITE_MODULE, MODULES, TARGETS};

#[test]
fn generation_is_deterministic() {
    let catalog = Catalog::new().unwrap();
    for module in MODULES {
        let first = catalog.render(module.id, "LOCAL_HOST");
        let second = catalog.render(module.id, "LOCAL_HOST");
        assert_eq!(first, second, "module {} not deterministic", module.id);
        assert!(!first.is_empty());
    }
}

#[test]
fn every_module_has_phase_labels() {
    let catalog = Catalog::new().unwrap();
    for module in MODULES {
        assert!(
            !catalog.phase_labels(module.id).is_empty(),
            "module {} has no phase labels",
            module.id
        );
    }
}

#[test]
fn composite_prefixes_subsystem_artifacts() {
    let catalog = Catalog::new().unwrap();
    let artifacts = catalog.render(COMPOSITE_MODULE, "HYPERSCALE_CLOUD");

    // Own artifacts first, unprefixed.
    assert!(artifacts.iter().any(|a| a.filename == "README.md"));

    // Each leaf module appears under subsystems/<id>/.
    for sub in [
        "HFT_ARBITRAGE_CORE",
        "AEGIS_FIREWALL_DAEMON",
        "SWARM_INFRA_MESH",
        "OMNI_RESEARCH_PIPELINE",
        "VERTEX_AI_SCANNER",
        "PATHFINDER_EXPORT_SERVICE",
    ] {
        let prefix = format!("subsystems/{sub}/");
        assert!(
            artifacts.iter().any(|a| a.filename.starts_with(&prefix)),
            "no artifacts under {prefix}"
        );
    }

    // The composite never bundles itself.
    let self_prefix = format!("subsystems/{COMPOSITE_MODULE}/");
    assert!(!artifacts.iter().any(|a| a.filename.starts_with(&self_prefix)));
}

#[test]
fn composite_sub_artifacts_match_standalone_render() {
    let catalog = Catalog::new().unwrap();
    let composite = catalog.render(COMPOSITE_MODULE, "LOCAL_HOST");
    let standalone = catalog.render("HFT_ARBITRAGE_CORE", "LOCAL_HOST");

    for artifact in &standalone {
        let prefixed = format!("subsystems/HFT_ARBITRAGE_CORE/{}", artifact.filename);
        let bundled = composite
            .iter()
            .find(|a| a.filename == prefixed)
            .unwrap_or_else(|| panic!("missing {prefixed}"));
        assert_eq!(bundled.body, artifact.body);
    }
}

#[test]
fn unknown_module_yields_fallback() {
    let catalog = Catalog::new().unwrap();
    let artifacts = catalog.render("NOT_A_MODULE", "LOCAL_HOST");
    assert_eq!(artifacts.len(), 1);
    assert_eq!(artifacts[0].filename, "README.md");
}

#[test]
fn target_changes_text_not_file_selection() {
    let catalog = Catalog::new().unwrap();
    let baseline: Vec<String> = catalog
        .render("AEGIS_FIREWALL_DAEMON", "LOCAL_HOST")
        .into_iter()
        .map(|a| a.filename)
        .collect();
    for target in TARGETS {
        let names: Vec<String> = catalog
            .render("AEGIS_FIREWALL_DAEMON", target.id)
            .into_iter()
            .map(|a| a.filename)
            .collect();
        assert_eq!(names, baseline);
    }
}
