//! Composition planning
//!
//! Turns a validated [`ProjectConfig`] into the ordered list of steps the
//! composer executes plus the manifest mutation for the primary app. Planning
//! touches no filesystem, so layout and layering decisions are testable on
//! their own.

use crate::config::generator::{self, PNPM_WORKSPACE_FILE};
use crate::config::{
    Animation, Backend, ConfigModel, Platform, ProjectConfig, StateManager, Styling, WebFramework,
};
use crate::error::{Result, ScaffoldError};
use crate::templates::{CopyOptions, ManifestLayer, ManifestMutation, TemplateGroup};
use std::path::{Path, PathBuf};

/// Name of the manifest file mutated by the dependency layers
pub const MANIFEST_FILE: &str = "package.json";

/// Destination layout, decided once per run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Everything lands in the project root
    Flat,
    /// Apps under `apps/*`, shared code and backend under `packages/*`
    Monorepo,
}

/// One composition step
#[derive(Debug, Clone)]
pub enum Step {
    CreateDir(PathBuf),
    WriteFile {
        path: PathBuf,
        contents: String,
    },
    Copy {
        group: TemplateGroup,
        dest: PathBuf,
        options: CopyOptions,
    },
}

/// Ordered composition of a project
#[derive(Debug, Clone)]
pub struct Plan {
    pub root: PathBuf,
    pub layout: Layout,
    /// Directory receiving app-level layers (features, dependencies)
    pub app_dir: PathBuf,
    pub steps: Vec<Step>,
    pub manifest: ManifestMutation,
}

impl Plan {
    pub fn build(config: &ProjectConfig, model: &ConfigModel, root: PathBuf) -> Result<Self> {
        let layout = if model.is_monorepo(config.preset) {
            Layout::Monorepo
        } else {
            Layout::Flat
        };
        let platforms = model.platforms(config.preset);
        let primary = model.descriptor(config.preset).primary_platform();

        let mut steps = vec![Step::CreateDir(root.clone())];

        let app_dir = match layout {
            Layout::Monorepo => {
                let manifest_path = root.join(MANIFEST_FILE);
                let manifest = generator::monorepo_root_manifest(
                    &config.name,
                    config.package_manager,
                    platforms,
                    config.backend.runs_server(),
                );
                steps.push(Step::WriteFile {
                    contents: generator::to_json_file(&manifest).map_err(|e| {
                        ScaffoldError::Manifest {
                            path: manifest_path.clone(),
                            source: e,
                        }
                    })?,
                    path: manifest_path,
                });

                if config.package_manager.uses_workspace_file() {
                    let path = root.join(PNPM_WORKSPACE_FILE);
                    steps.push(Step::WriteFile {
                        contents: generator::pnpm_workspace().map_err(|e| {
                            ScaffoldError::Yaml {
                                path: path.clone(),
                                source: e,
                            }
                        })?,
                        path,
                    });
                }

                let apps = root.join("apps");
                let packages = root.join("packages");
                steps.push(Step::CreateDir(apps.clone()));
                steps.push(Step::CreateDir(packages.clone()));

                for &platform in platforms {
                    let dest = apps.join(platform.as_str());
                    steps.push(copy(platform_group(platform, config.web_framework), &dest));
                    if platform == Platform::Mobile && config.eas {
                        steps.push(eas_step(&dest)?);
                    }
                }

                if config.backend != Backend::None {
                    steps.push(copy(
                        TemplateGroup::Backend(config.backend),
                        &packages.join("backend"),
                    ));
                }

                apps.join(primary.as_str())
            }
            Layout::Flat => {
                steps.push(copy(platform_group(primary, config.web_framework), &root));
                if primary == Platform::Mobile && config.eas {
                    steps.push(eas_step(&root)?);
                }
                root.clone()
            }
        };

        steps.extend(feature_steps(config, primary, &app_dir));

        // Generic defaults go last and never clobber more specific files
        steps.push(Step::Copy {
            group: TemplateGroup::Base,
            dest: root.clone(),
            options: CopyOptions::skip_existing(),
        });

        Ok(Self {
            manifest: dependency_layers(config, primary),
            root,
            layout,
            app_dir,
            steps,
        })
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.app_dir.join(MANIFEST_FILE)
    }

    /// Every `(group, destination)` pair in execution order
    pub fn copies(&self) -> impl Iterator<Item = (&TemplateGroup, &Path)> {
        self.steps.iter().filter_map(|step| match step {
            Step::Copy { group, dest, .. } => Some((group, dest.as_path())),
            _ => None,
        })
    }
}

fn copy(group: TemplateGroup, dest: &Path) -> Step {
    Step::Copy {
        group,
        dest: dest.to_path_buf(),
        options: CopyOptions::default(),
    }
}

fn eas_step(app_dir: &Path) -> Result<Step> {
    let path = app_dir.join("eas.json");
    let contents =
        generator::to_json_file(&generator::eas_config()).map_err(|e| ScaffoldError::Manifest {
            path: path.clone(),
            source: e,
        })?;
    Ok(Step::WriteFile { path, contents })
}

/// Application skeleton group for a platform
fn platform_group(platform: Platform, web_framework: WebFramework) -> TemplateGroup {
    match (platform, web_framework) {
        (Platform::Web, WebFramework::Vite) => TemplateGroup::Vite,
        (platform, _) => TemplateGroup::Platform(platform),
    }
}

/// Option-gated feature groups layered into the primary app
fn feature_steps(config: &ProjectConfig, primary: Platform, app_dir: &Path) -> Vec<Step> {
    let mut steps = Vec::new();

    // Tailwind ships inside the web skeletons
    if config.styling == Styling::Nativewind {
        steps.push(copy(TemplateGroup::Styling(Styling::Nativewind), app_dir));
    }

    let lib = app_dir.join("lib");
    steps.push(copy(TemplateGroup::State(config.state), &lib.join("store")));

    if config.components != crate::config::Components::None {
        steps.push(copy(
            TemplateGroup::Components(config.components),
            &app_dir.join("components").join("ui"),
        ));
    }

    if config.backend != Backend::None {
        steps.push(copy(
            TemplateGroup::Backend(config.backend),
            &lib.join("backend"),
        ));
        steps.push(Step::Copy {
            group: TemplateGroup::Lib,
            dest: lib.clone(),
            options: CopyOptions::excluding(["store", "backend"]),
        });
    }

    let examples_dest = match primary {
        Platform::Mobile => app_dir.join("app"),
        Platform::Web => app_dir.join("app").join("examples"),
    };
    steps.push(copy(TemplateGroup::Examples(primary), &examples_dest));

    steps
}

/// Dependency layers for the primary app, in application order:
/// state, animation, platform, backend
pub fn dependency_layers(config: &ProjectConfig, primary: Platform) -> ManifestMutation {
    let mut mutation = ManifestMutation::new();

    mutation.push(match config.state {
        StateManager::Zustand => ManifestLayer::new("state").dependency("zustand", "^4.5.0"),
        StateManager::Redux => ManifestLayer::new("state")
            .dependency("@reduxjs/toolkit", "^2.0.0")
            .dependency("react-redux", "^9.0.0"),
    });

    mutation.push(match config.animation {
        Animation::Reanimated => ManifestLayer::new("animation")
            .dependency("react-native-reanimated", "^3.10.0")
            .dependency("react-native-gesture-handler", "^2.16.0"),
        Animation::Moti => ManifestLayer::new("animation")
            .dependency("moti", "^0.29.0")
            .dependency("react-native-reanimated", "^3.10.0"),
        Animation::Framer => {
            ManifestLayer::new("animation").dependency("framer-motion", "^11.0.0")
        }
        Animation::None => ManifestLayer::new("animation"),
    });

    mutation.push(platform_layer(config, primary));

    mutation.push(match config.backend {
        Backend::Supabase => {
            ManifestLayer::new("backend").dependency("@supabase/supabase-js", "^2.39.0")
        }
        Backend::Firebase => ManifestLayer::new("backend").dependency("firebase", "^10.7.0"),
        // NestJS backends are standalone packages under packages/backend
        Backend::NestjsPostgres | Backend::NestjsMongodb | Backend::None => {
            ManifestLayer::new("backend")
        }
    });

    mutation
}

fn platform_layer(config: &ProjectConfig, primary: Platform) -> ManifestLayer {
    match primary {
        Platform::Mobile => {
            let mut layer = ManifestLayer::new("platform")
                .dependency("@lazorkit/wallet-mobile-adapter", "latest")
                .dependency("@solana/web3.js", "^1.95.0")
                .dependency("react-native-get-random-values", "~1.11.0")
                .dependency("react-native-url-polyfill", "^2.0.0")
                .dependency("buffer", "^6.0.3")
                .dependency("expo-crypto", "~15.0.0")
                .dependency("expo-linking", "~8.0.11")
                .dependency("expo-web-browser", "~15.0.10")
                .dependency("expo-clipboard", "~7.0.0");
            if config.styling == Styling::Nativewind {
                layer = layer
                    .dependency("nativewind", "^4.0.0")
                    .dev_dependency("tailwindcss", "^3.4.0");
            }
            layer
        }
        Platform::Web => {
            let mut layer = ManifestLayer::new("platform")
                .dependency("@lazorkit/wallet", "latest")
                .dependency("@solana/web3.js", "^1.95.0")
                .dependency("@coral-xyz/anchor", "^0.30.0")
                .dependency("buffer", "^6.0.3");
            if config.web_framework == WebFramework::Vite {
                layer = layer.dev_dependency("vite-plugin-node-polyfills", "^0.22.0");
                if config.styling == Styling::Tailwind {
                    layer = layer
                        .dev_dependency("tailwindcss", "^3.4.0")
                        .dev_dependency("postcss", "^8.4.0")
                        .dev_dependency("autoprefixer", "^10.4.0");
                }
            }
            layer
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Components, PackageManager, Preset};
    use crate::templates::Section;

    fn plan_for(config: &ProjectConfig) -> Plan {
        Plan::build(config, &ConfigModel::standard(), PathBuf::from("/work/app")).unwrap()
    }

    fn defaults(preset: Preset) -> ProjectConfig {
        ProjectConfig::with_defaults(&ConfigModel::standard(), "app", preset)
    }

    fn groups(plan: &Plan) -> Vec<String> {
        plan.copies().map(|(g, _)| g.to_string()).collect()
    }

    #[test]
    fn test_flat_mobile_plan() {
        let plan = plan_for(&defaults(Preset::Mobile));
        assert_eq!(plan.layout, Layout::Flat);
        assert_eq!(plan.app_dir, PathBuf::from("/work/app"));
        assert_eq!(
            groups(&plan),
            vec![
                "mobile",
                "styling/nativewind",
                "state/zustand",
                "components/nativewind-ui",
                "examples/mobile",
                "base",
            ]
        );

        let dests: Vec<_> = plan.copies().map(|(_, d)| d.to_path_buf()).collect();
        assert_eq!(dests[2], PathBuf::from("/work/app/lib/store"));
        assert_eq!(dests[3], PathBuf::from("/work/app/components/ui"));
        assert_eq!(dests[4], PathBuf::from("/work/app/app"));
    }

    #[test]
    fn test_base_is_last_and_skips_existing() {
        let plan = plan_for(&defaults(Preset::Monorepo));
        match plan.steps.last().unwrap() {
            Step::Copy { group, dest, options } => {
                assert_eq!(*group, TemplateGroup::Base);
                assert_eq!(dest, &PathBuf::from("/work/app"));
                assert!(options.skip_existing);
            }
            other => panic!("unexpected last step {:?}", other),
        }
    }

    #[test]
    fn test_monorepo_plan() {
        let plan = plan_for(&defaults(Preset::Monorepo));
        assert_eq!(plan.layout, Layout::Monorepo);
        assert_eq!(plan.app_dir, PathBuf::from("/work/app/apps/mobile"));

        let copies: Vec<_> = plan
            .copies()
            .map(|(g, d)| (g.to_string(), d.to_path_buf()))
            .collect();
        let expect = |group: &str, dest: &str| (group.to_string(), PathBuf::from(dest));
        assert_eq!(copies[0], expect("mobile", "/work/app/apps/mobile"));
        assert_eq!(copies[1], expect("web", "/work/app/apps/web"));
        assert_eq!(
            copies[2],
            expect("backend/nestjs-postgres", "/work/app/packages/backend")
        );
        assert!(copies.contains(&expect(
            "backend/nestjs-postgres",
            "/work/app/apps/mobile/lib/backend"
        )));
    }

    #[test]
    fn test_pnpm_monorepo_writes_workspace_file() {
        let mut config = defaults(Preset::FullstackWeb);
        config.package_manager = PackageManager::Pnpm;
        let plan = plan_for(&config);

        let written: Vec<_> = plan
            .steps
            .iter()
            .filter_map(|s| match s {
                Step::WriteFile { path, .. } => Some(path.clone()),
                _ => None,
            })
            .collect();
        assert!(written.contains(&PathBuf::from("/work/app/pnpm-workspace.yaml")));
        assert!(written.contains(&PathBuf::from("/work/app/package.json")));
    }

    #[test]
    fn test_vite_uses_vite_group_and_examples_under_app() {
        let mut config = defaults(Preset::Web);
        config.web_framework = WebFramework::Vite;
        let plan = plan_for(&config);

        let copies: Vec<_> = plan.copies().map(|(g, d)| (*g, d.to_path_buf())).collect();
        assert_eq!(copies[0].0, TemplateGroup::Vite);
        assert!(copies.contains(&(
            TemplateGroup::Examples(Platform::Web),
            PathBuf::from("/work/app/app/examples")
        )));
    }

    #[test]
    fn test_eas_written_into_mobile_app() {
        let plan = plan_for(&defaults(Preset::FullstackMobile));
        let eas = plan.steps.iter().any(|s| {
            matches!(s, Step::WriteFile { path, .. } if path == Path::new("/work/app/apps/mobile/eas.json"))
        });
        assert!(eas);

        let mut config = defaults(Preset::Mobile);
        config.eas = false;
        let plan = plan_for(&config);
        assert!(!plan
            .steps
            .iter()
            .any(|s| matches!(s, Step::WriteFile { path, .. } if path.ends_with("eas.json"))));
    }

    #[test]
    fn test_none_options_skip_groups() {
        let mut config = defaults(Preset::Web);
        config.components = Components::None;
        config.styling = Styling::None;
        let groups = groups(&plan_for(&config));
        assert!(!groups.iter().any(|g| g.starts_with("components/")));
        assert!(!groups.iter().any(|g| g.starts_with("styling/")));
        assert!(!groups.iter().any(|g| g.starts_with("backend/")));
        assert!(!groups.contains(&"lib".to_string()));
    }

    #[test]
    fn test_lib_copy_excludes_specific_dirs() {
        let mut config = defaults(Preset::FullstackWeb);
        config.backend = Backend::Supabase;
        let plan = plan_for(&config);
        let lib = plan
            .steps
            .iter()
            .find_map(|s| match s {
                Step::Copy {
                    group: TemplateGroup::Lib,
                    options,
                    dest,
                } => Some((options.clone(), dest.clone())),
                _ => None,
            })
            .unwrap();
        assert_eq!(lib.0.exclude, vec!["store", "backend"]);
        assert_eq!(lib.1, PathBuf::from("/work/app/apps/web/lib"));
    }

    #[test]
    fn test_dependency_layer_order() {
        let mut config = defaults(Preset::FullstackMobile);
        config.backend = Backend::Firebase;
        config.state = StateManager::Redux;
        config.animation = Animation::Moti;
        let mutation = dependency_layers(&config, Platform::Mobile);

        let names: Vec<_> = mutation.layers().iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["state", "animation", "platform", "backend"]);
        assert_eq!(
            mutation.resolved(Section::Dependencies, "react-redux"),
            Some("^9.0.0")
        );
        assert_eq!(mutation.resolved(Section::Dependencies, "moti"), Some("^0.29.0"));
        assert_eq!(mutation.resolved(Section::Dependencies, "firebase"), Some("^10.7.0"));
        assert_eq!(
            mutation.resolved(Section::DevDependencies, "tailwindcss"),
            Some("^3.4.0")
        );
    }

    #[test]
    fn test_nestjs_backend_adds_no_app_dependency() {
        let config = defaults(Preset::FullstackWeb);
        assert_eq!(config.backend, Backend::NestjsPostgres);
        let mutation = dependency_layers(&config, Platform::Web);
        assert!(mutation.layers().iter().all(|l| l.name != "backend"));
    }

    #[test]
    fn test_web_dev_dependencies_depend_on_framework() {
        let mut config = defaults(Preset::Web);
        let next = dependency_layers(&config, Platform::Web);
        assert_eq!(next.resolved(Section::DevDependencies, "tailwindcss"), None);
        assert_eq!(
            next.resolved(Section::Dependencies, "@coral-xyz/anchor"),
            Some("^0.30.0")
        );

        config.web_framework = WebFramework::Vite;
        let vite = dependency_layers(&config, Platform::Web);
        assert_eq!(
            vite.resolved(Section::DevDependencies, "vite-plugin-node-polyfills"),
            Some("^0.22.0")
        );
        assert_eq!(vite.resolved(Section::DevDependencies, "autoprefixer"), Some("^10.4.0"));

        config.styling = Styling::None;
        let plain = dependency_layers(&config, Platform::Web);
        assert_eq!(plain.resolved(Section::DevDependencies, "postcss"), None);
    }
}
