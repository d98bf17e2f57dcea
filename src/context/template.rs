//! Document templates
//!
//! Renders the project context document (`CLAUDE.md`) for existing and new
//! projects, and the framework-owned core rules document.

use std::fmt::Write;

use crate::inspector::ProjectInfo;

const SECTION_BREAK: &str = "\n\n---\n\n";

const CORE_LINK: &str = "> **Note**: This is your project context. Add your team's rules here.\n\
> Core framework rules are loaded from `.claude/CVF_CORE.md`.";

/// Agent routing rows: (intent, trigger keywords, agent)
const ROUTING_TABLE: &[(&str, &str, &str)] = &[
    ("Build Product", "\"build me\", \"create app\", \"make a...\"", "cvf-orchestrator"),
    ("Plan Feature", "\"plan\", \"how to\", \"design\"", "cvf-planner"),
    ("Fix Bug", "\"error\", \"fix\", \"broken\", \"debug\"", "cvf-debugger"),
    (
        "Apply Change",
        "\"apply this\", \"go ahead\", \"do it\"",
        "cvf-applier (MANDATORY for code changes)",
    ),
    ("Review Code", "\"review\", \"check this\"", "cvf-reviewer"),
    ("Architecture", "\"structure\", \"pattern\", \"system design\"", "cvf-architect"),
    ("Security", "\"auth\", \"secure\", \"vulnerability\"", "cvf-security"),
    ("Performance", "\"slow\", \"optimize\", \"speed up\"", "cvf-performance"),
    ("UI/UX", "\"style\", \"design\", \"layout\", \"css\"", "cvf-ui-ux"),
    ("Research", "\"library\", \"docs\", \"best practice\"", "cvf-researcher"),
];

/// Context document for a project with existing code
pub fn existing_project(info: &ProjectInfo) -> String {
    [
        header(&info.name, &info.description),
        tech_stack(info),
        quick_reference(info),
        directory_structure(info),
        user_conventions(true),
        framework_rules(),
    ]
    .join(SECTION_BREAK)
}

/// Skeleton context document for a project that has no code yet
pub fn new_project(name: &str) -> String {
    let mut doc = [
        header(name, "[TODO: Describe what this project does]"),
        "## Tech Stack\n\n[TODO: Add after initial setup]\n- **Language**: \n- **Framework**: \n- **Test**: "
            .to_string(),
        "## Quick Reference\n\n```bash\n# [TODO: Add commands after setup]\n```".to_string(),
        user_conventions(false),
    ]
    .join(SECTION_BREAK);
    doc.push('\n');
    doc
}

/// Framework-owned rules document carrying `version` and the routing table
pub fn core_rules(version: &str) -> String {
    let mut doc = String::new();
    let _ = writeln!(doc, "<!-- .claude/CVF_CORE.md -->");
    let _ = writeln!(doc, "<!--");
    let _ = writeln!(doc, "  CLAUDE VIBE FLOW CORE RULES");
    let _ = writeln!(doc, "  Version: {version}");
    let _ = writeln!(doc, "  This file is generated by vibe-flow and replaced on every install.");
    let _ = writeln!(doc, "  Put project-specific rules in CLAUDE.md.");
    let _ = writeln!(doc, "-->");
    doc.push('\n');

    doc.push_str(
        "<system_role>\n\
         You are an expert AI software engineer using the Claude Vibe Flow framework.\n\
         Deliver production-ready code by orchestrating the specialized agents below.\n\
         </system_role>\n\n",
    );

    doc.push_str("<agent_routing_table>\n");
    doc.push_str("| User Intent | Trigger Keywords | Agent to Invoke |\n");
    doc.push_str("|-------------|------------------|-----------------|\n");
    for (intent, triggers, agent) in ROUTING_TABLE {
        let _ = writeln!(doc, "| {intent} | {triggers} | {agent} |");
    }
    doc.push_str("</agent_routing_table>\n\n");

    doc.push_str(
        "<coding_standards>\n\
         \x20 <ui_text_rule>\n\
         \x20   User-facing text (buttons, toasts, labels, errors, placeholders) MUST be in English.\n\
         \x20 </ui_text_rule>\n\
         \x20 <type_safety>\n\
         \x20   NEVER silence the type checker (`as any`, `@ts-ignore`, `@ts-expect-error`).\n\
         \x20   Fix the root cause instead.\n\
         \x20 </type_safety>\n\
         \x20 <verification>\n\
         \x20   ALWAYS run diagnostics on changed files and the tests when they exist.\n\
         \x20 </verification>\n\
         \x20 <security>\n\
         \x20   No hardcoded secrets. Validate inputs and encode outputs.\n\
         \x20 </security>\n\
         </coding_standards>\n\n",
    );

    doc.push_str(
        "<workflow_protocol>\n\
         \x20 <step name=\"Checkpoint\">\n\
         \x20   Create a checkpoint (/rewind or git stash) before risky changes.\n\
         \x20 </step>\n\
         \x20 <step name=\"Implementation\">\n\
         \x20   Route changes over 10 lines or across files through cvf-applier.\n\
         \x20   Checkpoint -> Analyze -> Assess -> Plan -> Implement -> Verify.\n\
         \x20 </step>\n\
         \x20 <step name=\"Verification\">\n\
         \x20   1. Diagnostics clean\n\
         \x20   2. Typecheck and lint\n\
         \x20   3. Tests pass\n\
         \x20 </step>\n\
         </workflow_protocol>\n\n",
    );

    doc.push_str(
        "<memory_management>\n\
         \x20 Read `.claude/LESSONS.md` when it exists to avoid repeating past mistakes,\n\
         \x20 and record new lessons about this project there.\n\
         </memory_management>\n",
    );

    doc
}

fn header(name: &str, description: &str) -> String {
    format!("# CLAUDE.md - {name}\n\n{CORE_LINK}\n\n## Project Overview\n\n{description}")
}

fn tech_stack(info: &ProjectInfo) -> String {
    let stack = &info.tech_stack;
    let mut lines = vec!["## Tech Stack".to_string(), String::new()];

    if !stack.languages.is_empty() {
        lines.push(format!("- **Language**: {}", stack.languages.join(", ")));
    }
    if !stack.frameworks.is_empty() {
        lines.push(format!("- **Framework**: {}", stack.frameworks.join(", ")));
    }
    if let Some(test) = &stack.test_framework {
        lines.push(format!("- **Test**: {test}"));
    }
    if let Some(pm) = &stack.package_manager {
        lines.push(format!("- **Package Manager**: {pm}"));
    }
    if lines.len() == 2 {
        lines.push("[TODO: Add tech stack]".to_string());
    }

    lines.join("\n")
}

fn quick_reference(info: &ProjectInfo) -> String {
    let mut lines = vec![
        "## Quick Reference".to_string(),
        String::new(),
        "```bash".to_string(),
    ];

    if !info.scripts.is_empty() {
        let run = match info.tech_stack.package_manager.as_deref() {
            Some(pm @ ("yarn" | "pnpm" | "bun")) => pm,
            _ => "npm run",
        };
        let has = |name: &str| info.scripts.iter().any(|(script, _)| script == name);
        for (script, label) in [
            ("dev", "Development server"),
            ("build", "Build"),
            ("test", "Run tests"),
            ("lint", "Lint"),
            ("typecheck", "Type check"),
        ] {
            if has(script) {
                lines.push(format!("{:<20} # {label}", format!("{run} {script}")));
            }
        }
    } else {
        match info.tech_stack.test_framework.as_deref() {
            Some("pytest") => lines.push("pytest                # Run tests".to_string()),
            Some("go test") => {
                lines.push("go test ./...         # Run tests".to_string());
                lines.push("go build              # Build".to_string());
            }
            Some("cargo test") => {
                lines.push("cargo test            # Run tests".to_string());
                lines.push("cargo build           # Build".to_string());
            }
            _ => lines.push("# [TODO: Add commands]".to_string()),
        }
    }

    lines.push("```".to_string());
    lines.join("\n")
}

fn directory_structure(info: &ProjectInfo) -> String {
    let mut lines = vec![
        "## Directory Structure".to_string(),
        String::new(),
        "```".to_string(),
    ];
    if info.directories.is_empty() {
        lines.push("[Project directories will appear here]".to_string());
    } else {
        lines.extend(info.directories.iter().map(|dir| format!("{dir}/")));
    }
    lines.push("```".to_string());
    lines.join("\n")
}

fn user_conventions(with_examples: bool) -> String {
    let mut section =
        "## User Conventions\n\n[Add your team's specific coding conventions here]".to_string();
    if with_examples {
        section.push_str(
            "\n- e.g. \"Use snake_case for database columns\"\n- e.g. \"Always write tests for utils\"",
        );
    }
    section
}

fn framework_rules() -> String {
    "## Framework Rules\n\n\
     Core rules (agents, workflow, standards) are defined in:\n\
     - **[.claude/CVF_CORE.md](.claude/CVF_CORE.md)**\n\n\
     To update the framework:\n\
     ```bash\n\
     vibe-flow upgrade\n\
     ```"
    .to_string()
}
