//! React TypeScript CLI - Project scaffolding for React + TypeScript web apps

use anyhow::Result;
use clap::{Parser, Subcommand};
use scaffolder_core::tui::CreateArgs;
use scaffolder_core::ProductConfig;
use std::path::{Path, PathBuf};

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// React + TypeScript product configuration
#[derive(Clone)]
pub struct ReactTsConfig;

impl ProductConfig for ReactTsConfig {
    fn name(&self) -> &'static str {
        "react-ts"
    }

    fn display_name(&self) -> &'static str {
        "React + TypeScript"
    }

    fn default_template_dir(&self) -> PathBuf {
        std::env::var_os("REACT_TS_TEMPLATE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                Path::new(env!("CARGO_MANIFEST_DIR"))
                    .join("..")
                    .join("..")
                    .join("templates")
            })
    }

    fn template_url_env(&self) -> &'static str {
        "REACT_TS_TEMPLATE_URL"
    }

    fn docs_url(&self) -> &'static str {
        "https://react.dev/learn/typescript"
    }

    fn start_command(&self) -> &'static str {
        "npm start"
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install react-ts-tools --force"
    }

    fn next_steps(&self, dir: &Path, install_command: &str, installed: bool) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        // Step 1: cd to directory if not current
        if current.as_deref() != Some(dir) {
            steps.push(format!("cd {}", dir.display()));
        }

        // Step 2: Install dependencies if that was skipped
        if !installed {
            steps.push(install_command.to_string());
        }

        // Step 3: Start the dev server
        steps.push(self.start_command().to_string());

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "react-ts-tools")]
#[command(about = "CLI for scaffolding React + TypeScript web apps")]
#[command(version)]
pub struct Args {
    /// Print diagnostic logs (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new React + TypeScript app
    Create(CliCreateArgs),
    /// Build zip files for all templates in the template directory (for development use)
    BuildZips(BuildZipsArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Local directory to use for templates instead of the bundled ones (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Template name to use
    #[arg(short, long)]
    pub template: Option<String>,

    /// Project directory to create
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// App name (defaults to the directory name)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Optional packages to add (comma-separated tags, e.g. mobx,glamor)
    #[arg(short, long, value_delimiter = ',')]
    pub packages: Option<Vec<String>>,

    /// Do not install dependencies after generating the project
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            template_dir: args.template_dir,
            template: args.template,
            directory: args.directory,
            name: args.name,
            packages: args.packages,
            skip_install: args.skip_install,
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
pub struct BuildZipsArgs {
    /// Local directory containing templates to build zips from (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    scaffolder_core::logging::init(args.verbose);
    let config = ReactTsConfig;

    match args.command {
        Some(Command::BuildZips(build_args)) => {
            scaffolder_core::templates::build_zips(&config, &build_args.template_dir).await
        }
        command => {
            // No subcommand provided, default to create behavior (interactive mode)
            let create_args = match command {
                Some(Command::Create(create_args)) => create_args.into(),
                _ => CreateArgs::default(),
            };
            let result = scaffolder_core::run(&config, create_args, CLI_VERSION).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_create_args() {
        let args = Args::parse_from([
            "react-ts-tools",
            "create",
            "--name",
            "My App",
            "--packages",
            "mobx,glamor",
            "--skip-install",
            "-y",
        ]);

        let Some(Command::Create(create)) = args.command else {
            panic!("expected create subcommand");
        };
        let create: CreateArgs = create.into();
        assert_eq!(create.name.as_deref(), Some("My App"));
        assert_eq!(
            create.packages,
            Some(vec!["mobx".to_string(), "glamor".to_string()])
        );
        assert!(create.skip_install);
        assert!(create.yes);
    }

    #[test]
    fn test_no_subcommand_defaults_to_create() {
        let args = Args::parse_from(["react-ts-tools", "--verbose"]);
        assert!(args.command.is_none());
        assert!(args.verbose);
    }

    #[test]
    fn test_next_steps_when_install_skipped() {
        let steps = ReactTsConfig.next_steps(Path::new("/nonexistent/my-app"), "yarn", false);
        assert_eq!(
            steps,
            vec![
                "cd /nonexistent/my-app".to_string(),
                "yarn".to_string(),
                "npm start".to_string(),
            ]
        );
    }

    #[test]
    fn test_next_steps_when_installed() {
        let steps = ReactTsConfig.next_steps(Path::new("/nonexistent/my-app"), "yarn", true);
        assert_eq!(steps.last().map(String::as_str), Some("npm start"));
        assert!(!steps.iter().any(|s| s == "yarn"));
    }

    #[tokio::test]
    async fn test_bundled_template_generates_project() {
        use scaffolder_core::{plan_project, Answers, Classifier, TemplateFetcher};

        let mut fetcher =
            TemplateFetcher::from_local(ReactTsConfig.default_template_dir(), "test");
        let root = fetcher.fetch_root_manifest().await.unwrap();
        assert!(root.templates.iter().any(|t| t == "react-typescript"));

        let tree = fetcher.fetch_template("react-typescript").await.unwrap();
        let classifier = Classifier::new(tree.manifest.packages.clone());
        let answers = Answers {
            app_name: "My Cool App".to_string(),
            selection: ["mobx".to_string()].into_iter().collect(),
            skip_install: true,
        };

        let plan = plan_project(tree, &classifier, &answers).unwrap();
        let paths: Vec<&str> = plan.paths().collect();

        for expected in [
            ".gitignore",
            ".gitattributes",
            ".vscode/settings.json",
            "package.json",
            "src/index.html",
            "src/Index.tsx",
            "src/components/App.tsx",
            "src/store/AppStore.ts",
            "webpack.config.js",
        ] {
            assert!(paths.contains(&expected), "missing {}", expected);
        }
        assert!(paths.iter().all(|p| !p.split('/').any(|s| s.starts_with('_'))));

        assert_eq!(plan.manifest.name, "my-cool-app");
        assert_eq!(plan.manifest.dependencies.get("mobx"), Some("^3.3.1"));
        let html = String::from_utf8(plan.files["src/index.html"].clone()).unwrap();
        assert!(html.contains("<title>My Cool App</title>"));
    }
}
