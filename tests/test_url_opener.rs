#![cfg(unix)]

mod helpers;

use anyhow::Result;
use batchopen::application::{EmptyReason, RunOutcome};
use batchopen::cli::args::Args;
use batchopen::domain::DomainError;
use batchopen::open_urls;
use batchopen::util::cancel::CancelToken;
use helpers::{image_urls, TestWorkspace};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[test]
fn given_urls_when_opening_then_launches_batches_backs_up_and_clears_file() -> Result<()> {
    // Arrange
    let ws = TestWorkspace::new()?;
    let urls = image_urls(5);
    let content = format!("{}\n", urls.join("\n"));
    ws.write_urls(&content)?;

    // Act
    let outcome = open_urls(ws.shell_settings(2, Duration::from_millis(200)), CancelToken::new())?;

    // Assert
    assert_eq!(
        outcome,
        RunOutcome::Completed {
            opened: 5,
            batches: 3,
            backup: ws.backup_path.clone(),
        }
    );
    assert_eq!(std::fs::read_to_string(&ws.backup_path)?, content);
    assert!(ws.source_path.exists());
    assert_eq!(ws.source_content(), "");

    let invocations = ws.browser_invocations();
    assert_eq!(invocations.len(), 3);
    assert_eq!(invocations[0], vec!["first".to_string(), urls[0].clone(), urls[1].clone()]);
    assert_eq!(invocations[1], vec!["next".to_string(), urls[2].clone(), urls[3].clone()]);
    assert_eq!(invocations[2], vec!["next".to_string(), urls[4].clone()]);
    Ok(())
}

#[test]
fn given_reference_scenario_when_opening_then_only_first_url_is_launched() -> Result<()> {
    let ws = TestWorkspace::new()?;
    ws.write_urls("a.com/x\na.com/x\nb.com/y.webp\nc.com/z\n")?;
    ws.add_existing("z")?;

    let outcome = open_urls(ws.shell_settings(10, Duration::ZERO), CancelToken::new())?;

    assert!(matches!(outcome, RunOutcome::Completed { opened: 1, batches: 1, .. }));
    assert_eq!(
        ws.browser_invocations(),
        vec![vec!["first".to_string(), "a.com/x".to_string()]]
    );
    Ok(())
}

#[test]
fn given_empty_file_when_opening_then_nothing_to_open_and_no_backup() -> Result<()> {
    let ws = TestWorkspace::new()?;
    ws.write_urls("\n   \n\n")?;

    let outcome = open_urls(ws.shell_settings(10, Duration::ZERO), CancelToken::new())?;

    assert_eq!(outcome, RunOutcome::NothingToOpen(EmptyReason::NoUrls));
    assert!(!ws.backup_path.exists());
    assert_eq!(ws.source_content(), "\n   \n\n");
    assert!(ws.browser_invocations().is_empty());
    Ok(())
}

#[test]
fn given_all_urls_filtered_when_opening_then_source_untouched() -> Result<()> {
    let ws = TestWorkspace::new()?;
    ws.write_urls("https://a.com/pic.bmp\nhttps://a.com/done.jpg\n")?;
    ws.add_existing("done.jpg")?;

    let outcome = open_urls(ws.shell_settings(10, Duration::ZERO), CancelToken::new())?;

    assert_eq!(outcome, RunOutcome::NothingToOpen(EmptyReason::AllFiltered));
    assert!(!ws.backup_path.exists());
    assert_eq!(ws.source_content(), "https://a.com/pic.bmp\nhttps://a.com/done.jpg\n");
    Ok(())
}

#[test]
fn given_missing_url_file_when_opening_then_returns_missing_file() -> Result<()> {
    let ws = TestWorkspace::new()?;

    let result = open_urls(ws.shell_settings(10, Duration::ZERO), CancelToken::new());

    assert!(matches!(result, Err(DomainError::MissingFile(_))));
    Ok(())
}

#[test]
fn given_invalid_browser_when_opening_then_fails_without_backup() -> Result<()> {
    let ws = TestWorkspace::new()?;
    ws.write_urls("https://a.com/1.jpg\n")?;
    let mut settings = ws.shell_settings(10, Duration::ZERO);
    settings.browser_path = ws.root.join("no-such-browser");

    let result = open_urls(settings, CancelToken::new());

    assert!(matches!(result, Err(DomainError::BrowserNotFound(_))));
    assert_eq!(result.unwrap_err().exit_code(), 1);
    assert!(!ws.backup_path.exists());
    assert_eq!(ws.source_content(), "https://a.com/1.jpg\n");
    Ok(())
}

#[test]
fn given_cancel_during_batch_delay_when_opening_then_interrupted_and_file_kept() -> Result<()> {
    // Arrange
    let ws = TestWorkspace::new()?;
    ws.write_urls(&image_urls(4).join("\n"))?;
    let cancel = CancelToken::new();
    let remote = cancel.clone();
    let canceller = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(300));
        remote.cancel();
    });

    // Act
    let started = Instant::now();
    let result = open_urls(ws.shell_settings(2, Duration::from_secs(3600)), cancel);
    canceller.join().unwrap();

    // Assert
    let err = result.unwrap_err();
    assert!(matches!(err, DomainError::Interrupted));
    assert_eq!(err.exit_code(), 130);
    assert!(started.elapsed() < Duration::from_secs(30));
    assert!(ws.backup_path.exists());
    assert_eq!(ws.source_content(), image_urls(4).join("\n"));
    Ok(())
}

#[test]
fn given_config_file_when_running_then_uses_its_settings() -> Result<()> {
    let ws = TestWorkspace::new()?;
    ws.write_urls(&image_urls(3).join("\n"))?;
    let config_path = ws.write_config(&ws.shell_config(3, 0))?;

    let outcome = batchopen::run(Args {
        config: Some(config_path),
        verbose: 0,
    })?;

    assert!(matches!(outcome, RunOutcome::Completed { opened: 3, batches: 1, .. }));
    assert_eq!(ws.source_content(), "");
    Ok(())
}

#[test]
fn given_zero_batch_size_in_config_when_running_then_fails_with_invalid_config() -> Result<()> {
    let ws = TestWorkspace::new()?;
    ws.write_urls("https://a.com/1.jpg\n")?;
    let config_path = ws.write_config(&ws.shell_config(0, 0))?;

    let err = batchopen::run(Args {
        config: Some(config_path),
        verbose: 0,
    })
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<DomainError>(),
        Some(DomainError::InvalidConfig(_))
    ));
    assert_eq!(ws.source_content(), "https://a.com/1.jpg\n");
    Ok(())
}

#[test]
fn given_missing_config_path_when_running_then_fails() {
    let result = batchopen::run(Args {
        config: Some(PathBuf::from("/definitely/not/here/config.toml")),
        verbose: 0,
    });

    assert!(result.is_err());
}
