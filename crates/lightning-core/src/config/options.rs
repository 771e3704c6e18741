//! Closed option families for a scaffold configuration
//!
//! Every option the user can pick is a variant of one of these enums. The
//! serialized form (kebab-case) doubles as the template store directory name
//! for the option and as the value seen by `.hbs` templates.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Implements `as_str` and `Display` from a variant -> name table
macro_rules! option_names {
    ($ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// Kebab-case name, identical to the serialized form
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Top-level choice of target platform combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    Mobile,
    Web,
    FullstackMobile,
    FullstackWeb,
    Monorepo,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::Mobile,
        Preset::Web,
        Preset::FullstackMobile,
        Preset::FullstackWeb,
        Preset::Monorepo,
    ];
}

option_names!(Preset {
    Mobile => "mobile",
    Web => "web",
    FullstackMobile => "fullstack-mobile",
    FullstackWeb => "fullstack-web",
    Monorepo => "monorepo",
});

/// Application platform produced by a preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    Mobile,
    Web,
}

option_names!(Platform {
    Mobile => "mobile",
    Web => "web",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum WebFramework {
    #[default]
    Nextjs,
    Vite,
}

option_names!(WebFramework {
    Nextjs => "nextjs",
    Vite => "vite",
});

impl WebFramework {
    pub fn label(&self) -> &'static str {
        match self {
            WebFramework::Nextjs => "Next.js",
            WebFramework::Vite => "Vite",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            WebFramework::Nextjs => "Full-featured React framework",
            WebFramework::Vite => "Fast, lightweight SPA",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    None,
    NestjsPostgres,
    NestjsMongodb,
    Supabase,
    Firebase,
}

option_names!(Backend {
    None => "none",
    NestjsPostgres => "nestjs-postgres",
    NestjsMongodb => "nestjs-mongodb",
    Supabase => "supabase",
    Firebase => "firebase",
});

impl Backend {
    pub fn label(&self) -> &'static str {
        match self {
            Backend::None => "None",
            Backend::NestjsPostgres => "NestJS + PostgreSQL",
            Backend::NestjsMongodb => "NestJS + MongoDB",
            Backend::Supabase => "Supabase",
            Backend::Firebase => "Firebase",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            Backend::None => "",
            Backend::NestjsPostgres => "Prisma ORM",
            Backend::NestjsMongodb => "Mongoose ODM",
            Backend::Supabase => "BaaS with Postgres",
            Backend::Firebase => "Google BaaS",
        }
    }

    /// Backends shipped as a runnable server package rather than a client SDK
    pub fn runs_server(&self) -> bool {
        matches!(self, Backend::NestjsPostgres | Backend::NestjsMongodb)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Styling {
    Nativewind,
    Tailwind,
    None,
}

option_names!(Styling {
    Nativewind => "nativewind",
    Tailwind => "tailwind",
    None => "none",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum StateManager {
    #[default]
    Zustand,
    Redux,
}

option_names!(StateManager {
    Zustand => "zustand",
    Redux => "redux",
});

impl StateManager {
    pub fn label(&self) -> &'static str {
        match self {
            StateManager::Zustand => "Zustand",
            StateManager::Redux => "Redux Toolkit",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            StateManager::Zustand => "Simple, lightweight",
            StateManager::Redux => "Full-featured",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Components {
    NativewindUi,
    Shadcn,
    None,
}

option_names!(Components {
    NativewindUi => "nativewind-ui",
    Shadcn => "shadcn",
    None => "none",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Animation {
    Reanimated,
    Moti,
    Framer,
    None,
}

option_names!(Animation {
    Reanimated => "reanimated",
    Moti => "moti",
    Framer => "framer",
    None => "none",
});

impl Animation {
    pub fn label(&self) -> &'static str {
        match self {
            Animation::Reanimated => "React Native Reanimated",
            Animation::Moti => "Moti",
            Animation::Framer => "Framer Motion",
            Animation::None => "None",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            Animation::Moti => "Cross-platform, uses Reanimated",
            _ => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PackageManager {
    #[default]
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManager {
    pub const ALL: [PackageManager; 4] = [
        PackageManager::Npm,
        PackageManager::Pnpm,
        PackageManager::Yarn,
        PackageManager::Bun,
    ];

    /// Command used to start the dev server, shown in the next steps
    pub fn run_command(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm run",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
        }
    }

    /// Whether workspaces are declared in a dedicated file instead of the root manifest
    pub fn uses_workspace_file(&self) -> bool {
        matches!(self, PackageManager::Pnpm)
    }
}

option_names!(PackageManager {
    Npm => "npm",
    Pnpm => "pnpm",
    Yarn => "yarn",
    Bun => "bun",
});

/// Prompt label for option values that have no dedicated label
pub fn plain_label(value: &str) -> &str {
    if value == "none" {
        "None"
    } else {
        value
    }
}
