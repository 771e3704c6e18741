//! Preset descriptors and the option compatibility matrix

use super::options::{
    Animation, Backend, Components, Platform, Preset, StateManager, Styling, WebFramework,
};

/// Static description of a preset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetDescriptor {
    pub label: &'static str,
    pub hint: &'static str,
    /// Platforms produced by the preset; the first one is the primary app
    pub platforms: &'static [Platform],
}

impl PresetDescriptor {
    pub fn has_platform(&self, platform: Platform) -> bool {
        self.platforms.contains(&platform)
    }

    pub fn primary_platform(&self) -> Platform {
        self.platforms.first().copied().unwrap_or(Platform::Web)
    }
}

/// Option values legal for a preset. The first entry of each list is the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibleOptions {
    pub styling: Vec<Styling>,
    pub components: Vec<Components>,
    pub backend: Vec<Backend>,
    pub state: Vec<StateManager>,
    pub animation: Vec<Animation>,
    pub web_framework: Vec<WebFramework>,
}

impl CompatibleOptions {
    pub fn default_styling(&self) -> Styling {
        self.styling[0]
    }

    pub fn default_components(&self) -> Components {
        self.components[0]
    }

    pub fn default_backend(&self) -> Backend {
        self.backend[0]
    }

    pub fn default_state(&self) -> StateManager {
        self.state[0]
    }

    pub fn default_animation(&self) -> Animation {
        self.animation[0]
    }
}

const MOBILE: &[Platform] = &[Platform::Mobile];
const WEB: &[Platform] = &[Platform::Web];
const MOBILE_AND_WEB: &[Platform] = &[Platform::Mobile, Platform::Web];

/// Immutable configuration model handed to the composer.
///
/// Holds the preset table and answers every compatibility question, so the
/// engine never consults process-wide state.
#[derive(Debug, Clone)]
pub struct ConfigModel {
    presets: Vec<(Preset, PresetDescriptor)>,
}

impl Default for ConfigModel {
    fn default() -> Self {
        Self::standard()
    }
}

impl ConfigModel {
    /// The preset table shipped with the CLI
    pub fn standard() -> Self {
        let presets = Preset::ALL
            .iter()
            .map(|&preset| (preset, Self::standard_descriptor(preset)))
            .collect();
        Self { presets }
    }

    fn standard_descriptor(preset: Preset) -> PresetDescriptor {
        match preset {
            Preset::Mobile => PresetDescriptor {
                label: "Mobile App",
                hint: "React Native + Expo",
                platforms: MOBILE,
            },
            Preset::Web => PresetDescriptor {
                label: "Web App",
                hint: "Next.js or Vite",
                platforms: WEB,
            },
            Preset::FullstackMobile => PresetDescriptor {
                label: "Full-Stack Mobile",
                hint: "React Native + Backend",
                platforms: MOBILE,
            },
            Preset::FullstackWeb => PresetDescriptor {
                label: "Full-Stack Web",
                hint: "Web + Backend",
                platforms: WEB,
            },
            Preset::Monorepo => PresetDescriptor {
                label: "Monorepo",
                hint: "Mobile + Web + Backend",
                platforms: MOBILE_AND_WEB,
            },
        }
    }

    /// All presets in display order
    pub fn presets(&self) -> impl Iterator<Item = (Preset, &PresetDescriptor)> {
        self.presets.iter().map(|(preset, desc)| (*preset, desc))
    }

    pub fn descriptor(&self, preset: Preset) -> &PresetDescriptor {
        self.presets
            .iter()
            .find(|(p, _)| *p == preset)
            .map(|(_, desc)| desc)
            .unwrap_or_else(|| unreachable!("preset table covers every Preset variant"))
    }

    pub fn platforms(&self, preset: Preset) -> &'static [Platform] {
        self.descriptor(preset).platforms
    }

    pub fn has_mobile(&self, preset: Preset) -> bool {
        self.descriptor(preset).has_platform(Platform::Mobile)
    }

    pub fn has_web(&self, preset: Preset) -> bool {
        self.descriptor(preset).has_platform(Platform::Web)
    }

    /// Presets that ship a backend choice
    pub fn has_backend(&self, preset: Preset) -> bool {
        matches!(
            preset,
            Preset::FullstackMobile | Preset::FullstackWeb | Preset::Monorepo
        )
    }

    /// Presets laid out as an `apps/*` + `packages/*` workspace
    pub fn is_monorepo(&self, preset: Preset) -> bool {
        matches!(
            preset,
            Preset::FullstackMobile | Preset::FullstackWeb | Preset::Monorepo
        )
    }

    /// Web frameworks offered for a preset; presets without a web app keep
    /// the (unused) Next.js default
    pub fn web_frameworks(&self, preset: Preset) -> Vec<WebFramework> {
        if self.has_web(preset) {
            vec![WebFramework::Nextjs, WebFramework::Vite]
        } else {
            vec![WebFramework::Nextjs]
        }
    }

    /// Legal option values for a preset.
    ///
    /// Mobile platforms take precedence: a preset that ships a mobile app only
    /// offers the React Native styling, component and animation families.
    /// The web framework does not narrow any list today; it is accepted so
    /// callers can pass the full selection.
    pub fn compatible_options(
        &self,
        preset: Preset,
        _web_framework: Option<WebFramework>,
    ) -> CompatibleOptions {
        let has_mobile = self.has_mobile(preset);

        let (styling, components, animation) = if has_mobile {
            (
                vec![Styling::Nativewind, Styling::None],
                vec![Components::NativewindUi, Components::None],
                vec![Animation::Reanimated, Animation::Moti, Animation::None],
            )
        } else {
            (
                vec![Styling::Tailwind, Styling::None],
                vec![Components::Shadcn, Components::None],
                vec![Animation::Framer, Animation::None],
            )
        };

        let backend = if self.has_backend(preset) {
            vec![
                Backend::NestjsPostgres,
                Backend::NestjsMongodb,
                Backend::Supabase,
                Backend::Firebase,
            ]
        } else {
            vec![Backend::None]
        };

        CompatibleOptions {
            styling,
            components,
            backend,
            state: vec![StateManager::Zustand, StateManager::Redux],
            animation,
            web_framework: self.web_frameworks(preset),
        }
    }
}
