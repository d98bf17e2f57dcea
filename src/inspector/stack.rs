//! Technology stack detection from marker files

use std::path::Path;

use super::{PackageJson, read_optional};

/// Dependency name and display name of recognized Node frameworks
const NODE_FRAMEWORKS: &[(&str, &str)] = &[
    ("next", "Next.js"),
    ("react", "React"),
    ("vue", "Vue"),
    ("svelte", "Svelte"),
    ("express", "Express"),
    ("fastify", "Fastify"),
    ("@nestjs/core", "NestJS"),
];

/// First match wins
const NODE_TEST_FRAMEWORKS: &[(&str, &str)] =
    &[("vitest", "Vitest"), ("jest", "Jest"), ("mocha", "Mocha")];

const PYTHON_FRAMEWORKS: &[(&str, &str)] = &[
    ("fastapi", "FastAPI"),
    ("django", "Django"),
    ("flask", "Flask"),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TechStack {
    pub languages: Vec<String>,
    pub frameworks: Vec<String>,
    pub test_framework: Option<String>,
    pub package_manager: Option<String>,
}

impl TechStack {
    pub(super) fn detect(project: &Path, package: Option<&PackageJson>) -> Self {
        let mut stack = Self::default();
        let has = |name: &str| project.join(name).exists();

        if has("package.json") {
            let typescript = has("tsconfig.json") || has("tsconfig.base.json");
            stack.add_language(if typescript { "TypeScript" } else { "JavaScript" });
            stack.package_manager = Some(node_package_manager(project).to_string());

            if let Some(package) = package {
                for (dep, display) in NODE_FRAMEWORKS {
                    if package.has_dependency(dep) {
                        stack.frameworks.push(display.to_string());
                    }
                }
                stack.test_framework = NODE_TEST_FRAMEWORKS
                    .iter()
                    .find(|(dep, _)| package.has_dependency(dep))
                    .map(|(_, display)| display.to_string());
            }
        }

        if has("pyproject.toml") || has("requirements.txt") {
            stack.add_language("Python");
            stack.default_package_manager("pip/uv");

            if let Some(requirements) = read_optional(&project.join("requirements.txt")) {
                if requirements.contains("pytest") {
                    stack.default_test_framework("pytest");
                }
                for (marker, display) in PYTHON_FRAMEWORKS {
                    if requirements.contains(marker) {
                        stack.frameworks.push(display.to_string());
                    }
                }
            }
        }

        if has("go.mod") {
            stack.add_language("Go");
            stack.default_package_manager("go mod");
            stack.default_test_framework("go test");
        }

        if has("Cargo.toml") {
            stack.add_language("Rust");
            stack.default_package_manager("cargo");
            stack.default_test_framework("cargo test");
        }

        if has("Gemfile") {
            stack.add_language("Ruby");
            stack.default_package_manager("bundler");
        }

        if stack.languages.is_empty() {
            stack.add_language("Unknown");
        }

        stack
    }

    fn add_language(&mut self, language: &str) {
        self.languages.push(language.to_string());
    }

    fn default_package_manager(&mut self, manager: &str) {
        self.package_manager
            .get_or_insert_with(|| manager.to_string());
    }

    fn default_test_framework(&mut self, framework: &str) {
        self.test_framework
            .get_or_insert_with(|| framework.to_string());
    }
}

fn node_package_manager(project: &Path) -> &'static str {
    if project.join("pnpm-lock.yaml").exists() {
        "pnpm"
    } else if project.join("yarn.lock").exists() {
        "yarn"
    } else if project.join("bun.lockb").exists() {
        "bun"
    } else {
        "npm"
    }
}
