//! Script replay and text output.

use hexpaint_core::{CellIndex, ConfigError, EditorConfig, EditorInput, EditorState};
use hexpaint_render::{RenderContext, Renderer, RendererError, SceneRenderer};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

const USAGE: &str = "usage: hexpaint [--config <config.json>] <script.json>";

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}\n{usage}", usage = USAGE)]
    Usage(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid script: {0}")]
    Script(#[from] serde_json::Error),
    #[error("Render failed: {0}")]
    Render(#[from] RendererError),
}

/// Command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub config_path: Option<PathBuf>,
    pub script_path: PathBuf,
}

impl AppConfig {
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Result<Self, AppError> {
        let mut config_path = None;
        let mut script_path = None;
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    let path = args
                        .next()
                        .ok_or_else(|| AppError::Usage("--config needs a path".to_string()))?;
                    config_path = Some(PathBuf::from(path));
                }
                flag if flag.starts_with('-') => {
                    return Err(AppError::Usage(format!("unknown option {}", flag)));
                }
                _ if script_path.is_some() => {
                    return Err(AppError::Usage("only one script may be given".to_string()));
                }
                _ => script_path = Some(PathBuf::from(&arg)),
            }
        }

        let script_path = script_path.ok_or_else(|| AppError::Usage("missing script".to_string()))?;
        Ok(Self {
            config_path,
            script_path,
        })
    }
}

/// Counters from one script replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub inputs: usize,
    pub redraws: usize,
}

/// Editor plus the renderer it drives.
pub struct App {
    editor: EditorState,
    renderer: SceneRenderer,
}

impl App {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            editor: EditorState::new(config),
            renderer: SceneRenderer::new(),
        }
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn renderer(&self) -> &SceneRenderer {
        &self.renderer
    }

    /// Feed inputs to the editor, rebuilding the scene whenever it asks.
    pub fn replay(
        &mut self,
        inputs: impl IntoIterator<Item = EditorInput>,
    ) -> Result<RunSummary, AppError> {
        let mut summary = RunSummary::default();
        for input in inputs {
            summary.inputs += 1;
            if self.editor.handle(input).redraw {
                self.renderer.build_scene(&RenderContext::new(&self.editor))?;
                summary.redraws += 1;
            }
        }
        Ok(summary)
    }

    /// One line per lattice column: `.` empty, `#` painted, `o` line preview.
    pub fn render_text(&self) -> String {
        let grid = self.editor.grid();
        let preview: HashSet<CellIndex> = self.editor.preview().iter().copied().collect();
        let mut out = String::with_capacity((grid.rows() + 1) * grid.cols());
        for col in 0..grid.cols() {
            for row in 0..grid.rows() {
                let cell = CellIndex::new(row, col);
                out.push(if preview.contains(&cell) {
                    'o'
                } else if grid.state(cell).is_painted() {
                    '#'
                } else {
                    '.'
                });
            }
            out.push('\n');
        }
        out
    }
}

fn read(path: &Path) -> Result<String, AppError> {
    std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a JSON array of editor inputs.
pub fn parse_script(json: &str) -> Result<Vec<EditorInput>, AppError> {
    Ok(serde_json::from_str(json)?)
}

/// Load config and script, replay, and print the final lattice.
pub fn run(config: AppConfig) -> Result<(), AppError> {
    let editor_config = match &config.config_path {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };
    let inputs = parse_script(&read(&config.script_path)?)?;
    log::info!(
        "Replaying {} inputs from {}",
        inputs.len(),
        config.script_path.display()
    );

    let mut app = App::new(&editor_config);
    let summary = app.replay(inputs)?;
    log::info!(
        "Replayed {} inputs, {} redraws, {} undoable operations",
        summary.inputs,
        summary.redraws,
        app.editor().history().len()
    );

    print!("{}", app.render_text());
    println!(
        "painted: {}  tool: {}  zoomed: {}",
        app.editor().grid().painted_count(),
        app.editor().current_tool().name(),
        app.editor().camera().zoomed_in
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexpaint_core::{KeyEvent, Modifiers, PointerEvent, ToolKind};
    use kurbo::Point;
    use std::io::Write;
    use std::time::Duration;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn screen(app: &App, row: usize, col: usize) -> Point {
        let editor = app.editor();
        let center = editor.grid().center_of(CellIndex::new(row, col)).unwrap();
        editor.camera().world_to_screen(center, editor.viewport())
    }

    #[test]
    fn test_parse_args() {
        let config = AppConfig::from_args(args(&["--config", "c.json", "s.json"])).unwrap();
        assert_eq!(config.config_path, Some(PathBuf::from("c.json")));
        assert_eq!(config.script_path, PathBuf::from("s.json"));

        assert!(matches!(AppConfig::from_args(args(&[])), Err(AppError::Usage(_))));
        assert!(matches!(
            AppConfig::from_args(args(&["--config"])),
            Err(AppError::Usage(_))
        ));
        assert!(matches!(
            AppConfig::from_args(args(&["--verbose", "s.json"])),
            Err(AppError::Usage(_))
        ));
        assert!(matches!(
            AppConfig::from_args(args(&["a.json", "b.json"])),
            Err(AppError::Usage(_))
        ));
    }

    #[test]
    fn test_replay_paints_and_redraws() {
        let mut app = App::new(&EditorConfig::default());
        let position = screen(&app, 0, 0);
        let summary = app
            .replay([
                EditorInput::Pointer(PointerEvent::Down {
                    position,
                    time: Duration::ZERO,
                }),
                EditorInput::Pointer(PointerEvent::Up {
                    position,
                    time: Duration::from_millis(1),
                }),
            ])
            .unwrap();

        assert_eq!(summary, RunSummary { inputs: 2, redraws: 1 });
        assert_eq!(app.renderer().frames(), 1);
        assert!(app.render_text().starts_with('#'));
    }

    #[test]
    fn test_render_text_shows_preview() {
        let mut app = App::new(&EditorConfig::default());
        let (start, end) = (screen(&app, 0, 0), screen(&app, 0, 3));
        app.replay([
            EditorInput::SelectTool(ToolKind::Line),
            EditorInput::Pointer(PointerEvent::Down {
                position: start,
                time: Duration::ZERO,
            }),
            EditorInput::Pointer(PointerEvent::Move {
                position: end,
                time: Duration::from_millis(1),
            }),
        ])
        .unwrap();

        let text = app.render_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 30);
        for line in &lines[..4] {
            assert!(line.starts_with('o'));
        }
    }

    #[test]
    fn test_script_roundtrip_through_json() {
        let inputs = vec![
            EditorInput::SetBrushChannels([0, 255, 0]),
            EditorInput::Key(KeyEvent::Pressed {
                key: "z".to_string(),
                modifiers: Modifiers::CTRL,
            }),
        ];
        let json = serde_json::to_string(&inputs).unwrap();
        assert_eq!(parse_script(&json).unwrap(), inputs);
        assert!(matches!(parse_script("{"), Err(AppError::Script(_))));
    }

    #[test]
    fn test_run_from_files() {
        let mut script = tempfile::NamedTempFile::new().unwrap();
        write!(
            script,
            r#"[
                {{ "SelectTool": "Eraser" }},
                {{ "Key": {{ "Pressed": {{ "key": "z", "modifiers": {{ "ctrl": true }} }} }} }}
            ]"#
        )
        .unwrap();
        let mut config = tempfile::NamedTempFile::new().unwrap();
        write!(config, r#"{{ "grid": {{ "rows": 4, "cols": 4 }} }}"#).unwrap();

        let result = run(AppConfig {
            config_path: Some(config.path().to_path_buf()),
            script_path: script.path().to_path_buf(),
        });
        assert!(result.is_ok());

        let missing = run(AppConfig {
            config_path: None,
            script_path: PathBuf::from("/nonexistent/script.json"),
        });
        assert!(matches!(missing, Err(AppError::Io { .. })));
    }
}
