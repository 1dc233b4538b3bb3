use std::io::Write;

use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info};

use crate::application::RuntimeConfig;
use crate::application::data::ColorMode;
use crate::cli::Cli;
use crate::config::{Settings, SettingsError};
use crate::git::{GitError, GitSource};
use crate::records::{RecordError, parse_path_lines, parse_status_lines};
use crate::render::{AnsiStyle, LabelStyle, PlainStyle, TreeRenderer};
use crate::tree::{TreeError, build_tree, merge_trees, select_context};

pub struct Application;

impl Application {
    pub async fn run(cli: Cli) -> Result<(), ApplicationError> {
        let settings = Settings::read(&cli.root).await.context(SettingsSnafu)?;
        debug!("Loaded settings: {:?}", settings);

        let config = RuntimeConfig::resolve(cli, settings);
        debug!("Resolved runtime config: {:?}", config);

        let git = GitSource::new(&config.root);
        let tracked = git
            .tracked_files(&config.commit)
            .await
            .context(GitSnafu)?;
        let changed = git
            .changed_files(&config.commit)
            .await
            .context(GitSnafu)?;

        let style = Self::label_style(config.color);
        let lines = render_context_tree(&tracked, &changed, config.context, style.as_ref())?;
        info!("Rendered {} lines for commit '{}'", lines.len(), config.commit);

        let mut stdout = std::io::stdout().lock();
        for line in &lines {
            writeln!(stdout, "{line}").context(OutputSnafu)?;
        }

        Ok(())
    }

    /// Picks the label style once, at startup. `colored` otherwise makes its
    /// own tty check, which would undo `--color always` on a pipe.
    fn label_style(color: ColorMode) -> Box<dyn LabelStyle> {
        if color.colors_stdout() {
            colored::control::set_override(true);
            Box::new(AnsiStyle)
        } else {
            Box::new(PlainStyle)
        }
    }
}

/// Runs the whole transform from raw git listings to rendered lines.
///
/// Nothing is printed here, so a failure at any step leaves no partial tree
/// behind.
pub fn render_context_tree(
    tracked: &[String],
    changed: &[String],
    context: usize,
    style: &dyn LabelStyle,
) -> Result<Vec<String>, ApplicationError> {
    let full_records = parse_path_lines(tracked).context(FullListSnafu)?;
    let status_records = parse_status_lines(changed).context(StatusListSnafu)?;

    let full = build_tree(&full_records).context(BuildFullTreeSnafu)?;
    let status = build_tree(&status_records).context(BuildStatusTreeSnafu)?;
    let merged = merge_trees(&full, &status).context(MergeSnafu)?;
    let selected = select_context(&merged, &status, context);

    Ok(TreeRenderer::new(style).render(&selected))
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while loading settings"))]
    SettingsError { source: SettingsError },
    #[snafu(display("Critical failure encountered while querying git"))]
    GitError { source: GitError },
    #[snafu(display("Malformed entry in the list of tracked files"))]
    FullListError { source: RecordError },
    #[snafu(display("Malformed entry in the list of changed files"))]
    StatusListError { source: RecordError },
    #[snafu(display("Failed to build the tree of tracked files"))]
    BuildFullTreeError { source: TreeError },
    #[snafu(display("Failed to build the tree of changed files"))]
    BuildStatusTreeError { source: TreeError },
    #[snafu(display("Failed to merge changed files into the tracked tree"))]
    MergeError { source: TreeError },
    #[snafu(display("Failed to write the tree to stdout"))]
    OutputError { source: std::io::Error },
}
