//! 토이 터미널 REPL.
//!
//! `--terminal` 플래그로 진입하는 대화형 모드. 파일로 영속화되는
//! 데스크톱 상태 위에서 토이 셸 명령을 실행한다.

use std::io::{BufRead, Write};

use anyhow::Result;
use deskboard_desktop::terminal::{Terminal, TerminalSignal};
use deskboard_desktop::DesktopStore;

/// 표준 입출력 기반 REPL 루프
pub fn run(store: DesktopStore) -> Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut terminal = Terminal::new();

    println!("VirOS toysh — 'help'로 명령 목록, 'exit'로 종료");

    loop {
        let prompt_user = store
            .user()
            .map(|u| u.username.clone())
            .unwrap_or_else(|| "guest".to_string());
        write!(stdout, "{prompt_user}@viros:~$ ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF
            break;
        }

        match terminal.execute(&store, &line) {
            TerminalSignal::Exit => break,
            TerminalSignal::Clear => {
                // ANSI 화면 지우기
                write!(stdout, "\x1b[2J\x1b[H")?;
            }
            TerminalSignal::Continue => {
                if let Some(last) = terminal.history().last() {
                    println!("{}", last.output);
                }
            }
        }
    }

    println!("logout");
    Ok(())
}
