//! Charm-style CLI prompts using cliclack

use crate::config::{completion_message, detect_package_manager, Answers};
use crate::package::{Classifier, PackageTable, Selection};
use crate::product::ProductConfig;
use crate::runtime::{self, ToolManager};
use crate::templates::{copier, fetcher::TemplateFetcher, version, TemplateTree};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Local directory to use for templates instead of the configured source
    pub template_dir: Option<PathBuf>,

    /// Template name to use
    pub template: Option<String>,

    /// Project directory to create
    pub directory: Option<PathBuf>,

    /// App name (defaults to the directory name)
    pub name: Option<String>,

    /// Package tags to include
    pub packages: Option<Vec<String>>,

    /// Do not run the package manager after generating
    pub skip_install: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs, cli_version: &str) -> Result<()> {
    cliclack::intro(config.display_name())?;

    // Step 1: Setup template fetcher
    let mut fetcher = setup_fetcher(config, &args.template_dir)?;

    // Step 2: Select template
    let template_name = select_template(&fetcher, args.template.as_deref()).await?;
    let tree = fetcher.fetch_template(&template_name).await?;

    if let Some(warning) =
        version::check_compatibility(cli_version, &tree.manifest.version, config.upgrade_command())
    {
        cliclack::log::warning(format!("Version warning: {}", warning))?;
    }

    // Step 3: Select directory
    let project_dir = select_directory(&args)?;

    // Step 4: App name and packages
    let answers = collect_answers(&args, &project_dir, &tree.manifest.packages)?;

    // Step 5: Create project
    create_project(tree, &answers, &project_dir).await?;

    // Step 6: Install dependencies
    let manager = detect_package_manager();
    let installed = if answers.skip_install {
        cliclack::log::info("Skipping dependency installation")?;
        false
    } else {
        install_dependencies(ToolManager::new(*manager), &project_dir, &args).await?
    };

    // Step 7: Show next steps
    print_next_steps(config, &answers, &project_dir, &manager.install_command(), installed)?;

    Ok(())
}

fn setup_fetcher<C: ProductConfig>(
    config: &C,
    template_dir: &Option<PathBuf>,
) -> Result<TemplateFetcher> {
    let fetcher = match template_dir {
        Some(path) => TemplateFetcher::from_local(path.clone(), config.user_agent()),
        None => TemplateFetcher::from_config(config)?,
    };
    cliclack::log::info(format!("Using templates from {}", fetcher.source()))?;

    Ok(fetcher)
}

async fn select_template(
    fetcher: &TemplateFetcher,
    specified_template: Option<&str>,
) -> Result<String> {
    let spinner = cliclack::spinner();
    spinner.start("Loading templates...");

    let root_manifest = match fetcher.fetch_root_manifest().await {
        Ok(manifest) => manifest,
        Err(e) => {
            spinner.error("Failed to load templates");
            return Err(e);
        }
    };

    if let Some(template_name) = specified_template {
        if !root_manifest.templates.iter().any(|t| t == template_name) {
            spinner.error("Failed to load templates");
            anyhow::bail!(
                "Template '{}' not found. Available templates: {}",
                template_name,
                root_manifest.templates.join(", ")
            );
        }
        spinner.stop(format!("Template: {}", template_name));
        return Ok(template_name.to_string());
    }

    spinner.stop("Templates loaded");

    match root_manifest.templates.as_slice() {
        [] => anyhow::bail!("No templates found."),
        [only] => {
            cliclack::log::info(format!("Using template: {}", only))?;
            Ok(only.clone())
        }
        templates => {
            let mut select = cliclack::select("Select a template");
            for name in templates {
                select = select.item(name.clone(), name, "");
            }
            Ok(select.interact()?)
        }
    }
}

fn select_directory(args: &CreateArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let path = if let Some(dir) = &args.directory {
        let p = if dir.is_absolute() {
            dir.clone()
        } else {
            current_dir.join(dir)
        };
        cliclack::log::info(format!("Using directory: {}", p.display()))?;
        p
    } else if args.yes {
        current_dir
    } else {
        let input: String = cliclack::input("Project directory")
            .placeholder(".")
            .default_input(".")
            .interact()?;

        if input.is_empty() || input == "." {
            current_dir
        } else {
            let p = PathBuf::from(&input);
            if p.is_absolute() {
                p
            } else {
                current_dir.join(p)
            }
        }
    };

    if let Some(parent) = path.parent() {
        if !parent.exists() && parent != Path::new("") {
            anyhow::bail!("Parent directory does not exist: {}", parent.display());
        }
    }

    // Existing files may be overwritten
    if path.is_dir() {
        if let Ok(entries) = std::fs::read_dir(&path) {
            let count = entries.count();
            if count > 0 {
                cliclack::log::warning(format!("Directory has {} existing items", count))?;

                let confirm = if args.yes {
                    true
                } else {
                    cliclack::confirm("Continue anyway?")
                        .initial_value(true)
                        .interact()?
                };

                if !confirm {
                    anyhow::bail!("Setup cancelled.");
                }
            }
        }
    }

    Ok(path)
}

fn collect_answers(args: &CreateArgs, project_dir: &Path, table: &PackageTable) -> Result<Answers> {
    let default_name = Answers::default_app_name(project_dir);

    let app_name = match &args.name {
        Some(name) => name.clone(),
        None if args.yes => default_name,
        None => cliclack::input("Your app name")
            .default_input(&default_name)
            .placeholder(&default_name)
            .required(false)
            .interact()?,
    };

    let selection: Selection = match &args.packages {
        // Unknown tags are reported by the classifier
        Some(tags) => tags
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
        None if args.yes || table.is_empty() => Selection::new(),
        None => {
            let mut multi = cliclack::multiselect("Select additional packages to add");
            for choice in table.choices() {
                multi = multi.item(
                    choice.tag.clone(),
                    &choice.label,
                    choice.hint.as_deref().unwrap_or(""),
                );
            }
            multi.required(false).interact()?.into_iter().collect()
        }
    };

    if !selection.is_empty() {
        cliclack::log::success(format!(
            "Packages: {}",
            selection.iter().cloned().collect::<Vec<_>>().join(", ")
        ))?;
    }

    Ok(Answers {
        app_name,
        selection,
        skip_install: args.skip_install,
    })
}

async fn create_project(tree: &TemplateTree, answers: &Answers, project_dir: &Path) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Creating project...");

    let classifier = Classifier::new(tree.manifest.packages.clone());
    let result = match copier::plan_project(tree, &classifier, answers) {
        Ok(plan) => copier::write_project(&plan, project_dir).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(written) => {
            spinner.stop(format!(
                "Created {} files in {}",
                written.len(),
                project_dir.display()
            ));
            Ok(())
        }
        Err(e) => {
            spinner.error("Failed to create project");
            Err(e)
        }
    }
}

/// Returns whether dependencies were installed
async fn install_dependencies(tool: ToolManager, project_dir: &Path, args: &CreateArgs) -> Result<bool> {
    let manager = *tool.manager();

    for info in runtime::check_runtimes(&manager) {
        if info.available {
            cliclack::log::success(info.describe())?;
        } else {
            cliclack::log::warning(info.describe())?;
        }
    }

    if !tool.is_installed() {
        if args.yes {
            cliclack::log::info(format!(
                "Continuing without {} (--yes mode)",
                manager.display_name
            ))?;
            return Ok(false);
        }

        let action: &str = cliclack::select(format!(
            "{} is not installed. What would you like to do?",
            manager.display_name
        ))
        .item(
            "docs",
            format!("Open installation docs ({})", manager.docs_url),
            "",
        )
        .item("skip", "Skip dependency installation", "")
        .interact()?;

        if action == "docs" {
            tool.open_docs()?;
        }
        return Ok(false);
    }

    tool.install(project_dir).await?;
    cliclack::log::success("Dependencies installed")?;
    Ok(true)
}

fn print_next_steps<C: ProductConfig>(
    config: &C,
    answers: &Answers,
    project_dir: &Path,
    install_command: &str,
    installed: bool,
) -> Result<()> {
    let steps = config.next_steps(project_dir, install_command, installed);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    println!();
    println!("  Docs: {}", config.docs_url());

    cliclack::outro(completion_message(
        &answers.app_name,
        install_command,
        config.start_command(),
        !installed,
    ))?;

    Ok(())
}
