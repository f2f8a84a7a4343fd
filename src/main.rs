mod config;
mod controller;
mod models;
mod ui;

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::result::Result as StdResult;

use anyhow::{Context, Result, anyhow};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::info;
use ratatui::prelude::*;

use crate::config::{Config, LoggingConfig};
use crate::controller::ViewController;
use crate::models::PostStore;
use crate::ui::{App, render};

/// 获取数据目录路径 (~/.local/share/guestbook/)，仅用于日志文件
fn get_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow!("could not locate the user data directory"))?
        .join("guestbook");

    fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create {}", data_dir.display()))?;

    Ok(data_dir)
}

/// 日志写入文件，终端留给 TUI。设置了 RUST_LOG 时以其为准
fn init_logger(logging: &LoggingConfig) -> Result<PathBuf> {
    let log_path = get_data_dir()?.join("guestbook.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let mut builder = env_logger::Builder::from_default_env();
    if std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(logging.level_filter());
    }
    builder
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to initialize logger")?;

    Ok(log_path)
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)
}

/// 终端初始化中途失败时，先执行 restore 再返回错误
fn restore_on_err<T, E>(result: StdResult<T, E>, restore: impl FnOnce()) -> StdResult<T, E> {
    if result.is_err() {
        restore();
    }
    result
}

fn main() -> Result<()> {
    let config = match Config::default_path() {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };
    let log_path = init_logger(&config.logging)?;
    info!("guestbook starting, logging to {}", log_path.display());

    // 创建应用状态（留言只保存在内存中）
    let controller = ViewController::new(PostStore::new(), config.display);
    let mut app = App::new(controller);

    // 崩溃时恢复终端
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    // 设置终端
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    restore_on_err(execute!(stdout, EnterAlternateScreen), || {
        let _ = disable_raw_mode();
    })
    .context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = restore_on_err(Terminal::new(backend), || {
        let _ = restore_terminal();
    })
    .context("failed to initialize terminal")?;

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 恢复终端
    restore_terminal().context("failed to restore terminal")?;
    terminal.show_cursor()?;

    info!(
        "guestbook exiting, {} entries discarded",
        app.controller.store().len()
    );
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && ui::handle_key_event(app, key) {
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_failed_setup_restores_terminal() {
        let restored = Cell::new(false);
        let result: StdResult<(), io::Error> =
            restore_on_err(Err(io::Error::other("no tty")), || restored.set(true));

        assert!(result.is_err());
        assert!(restored.get());
    }

    #[test]
    fn test_successful_setup_leaves_terminal() {
        let restored = Cell::new(false);
        let result: StdResult<u8, io::Error> = restore_on_err(Ok(7), || restored.set(true));

        assert_eq!(result.unwrap(), 7);
        assert!(!restored.get());
    }
}
