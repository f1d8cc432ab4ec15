//! Report rendering for the `pinboard` binary.

use anyhow::{Result, anyhow};
use pinboard_core::{BoardReport, CrawlReport, DownloadResult};

/// Print the crawl report to stdout, as JSON or one summary line per unit.
pub fn print_report(report: &CrawlReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    for line in summary_lines(report) {
        println!("{}", line);
    }
    Ok(())
}

/// Single-pin modes fail the process when their one pin failed; crawls
/// that reached the board stage succeed regardless of individual pins.
pub fn ensure_success(report: &CrawlReport) -> Result<()> {
    match report {
        CrawlReport::SinglePage(result) | CrawlReport::Thumbnail(result) => match &result.outcome {
            Ok(_) => Ok(()),
            Err(e) => Err(anyhow!("{}: {}", result.pin_url, e)),
        },
        CrawlReport::Gallery(_) | CrawlReport::UserBoards(_) => Ok(()),
    }
}

fn summary_lines(report: &CrawlReport) -> Vec<String> {
    match report {
        CrawlReport::SinglePage(result) | CrawlReport::Thumbnail(result) => {
            vec![pin_line(result)]
        }
        CrawlReport::Gallery(board) => vec![board_line(board)],
        CrawlReport::UserBoards(user) => {
            let mut lines = Vec::with_capacity(user.boards.len() + 1);
            lines.push(format!("user {}: {} board(s)", user.username, user.boards.len()));
            for board in &user.boards {
                match &board.outcome {
                    Ok(report) => lines.push(board_line(report)),
                    Err(e) => lines.push(format!("{}: failed ({})", board.board_url, e)),
                }
            }
            lines
        }
    }
}

fn pin_line(result: &DownloadResult) -> String {
    match &result.outcome {
        Ok(saved) if saved.already_existed => {
            format!("{}: kept existing {}", result.pin_url, saved.path.display())
        }
        Ok(saved) => format!(
            "{}: saved {} ({} bytes)",
            result.pin_url,
            saved.path.display(),
            saved.size
        ),
        Err(e) => format!("{}: failed ({})", result.pin_url, e),
    }
}

fn board_line(board: &BoardReport) -> String {
    format!(
        "{} -> {}: {} pin(s), {} saved, {} already present, {} failed",
        board.board_url,
        board.folder.display(),
        board.pins_found,
        board.saved(),
        board.skipped(),
        board.failed()
    )
}
