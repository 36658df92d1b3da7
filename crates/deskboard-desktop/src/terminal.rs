//! 토이 터미널 명령 해석기.
//!
//! 데스크톱 시뮬레이션의 터미널 창에서 동작하는 장난감 셸이다.
//! 실제 프로세스를 실행하지 않으며, 고정된 명령 집합만 흉내낸다.

use rand::seq::IndexedRandom;
use rand::RngExt;

use crate::store::DesktopStore;

/// 터미널 명령 실행 결과 한 줄
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// 입력된 명령 (프롬프트 에코용)
    pub command: String,
    /// 출력 텍스트
    pub output: String,
    /// 에러 출력 여부
    pub is_error: bool,
}

/// 명령 실행 후 호스트가 취할 동작
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalSignal {
    /// 계속 입력 대기
    Continue,
    /// 화면(히스토리) 비움
    Clear,
    /// 터미널 창 닫기
    Exit,
}

/// 운세 문구 목록
const FORTUNES: &[&str] = &[
    "오늘의 버그는 내일의 기능이다.",
    "캐시를 의심하라. 항상 캐시다.",
    "재부팅으로 해결되지 않는 문제는 없다. 두 번 해보라.",
    "가장 좋은 코드는 지우는 코드다.",
    "컴파일이 된다고 끝난 게 아니다.",
    "백업은 세 개부터가 백업이다.",
];

/// 토이 터미널
#[derive(Default)]
pub struct Terminal {
    history: Vec<CommandOutput>,
}

impl Terminal {
    pub fn new() -> Self {
        Self::default()
    }

    /// 출력 히스토리 (clear 전까지 누적)
    pub fn history(&self) -> &[CommandOutput] {
        &self.history
    }

    /// 명령 한 줄 실행
    ///
    /// 출력은 히스토리에 쌓이고, 반환 시그널로 clear/exit를 알린다.
    pub fn execute(&mut self, store: &DesktopStore, input: &str) -> TerminalSignal {
        let input = input.trim();
        if input.is_empty() {
            return TerminalSignal::Continue;
        }

        let (command, args) = match input.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (input, ""),
        };

        let (output, is_error, signal) = match command {
            "clear" => {
                self.history.clear();
                return TerminalSignal::Clear;
            }
            "exit" => (String::from("logout"), false, TerminalSignal::Exit),
            "help" => (help_text(), false, TerminalSignal::Continue),
            "whoami" => (whoami(store), false, TerminalSignal::Continue),
            "date" => (
                chrono::Local::now().format("%a %b %e %T %Z %Y").to_string(),
                false,
                TerminalSignal::Continue,
            ),
            "echo" => (args.to_string(), false, TerminalSignal::Continue),
            "fortune" => (fortune(), false, TerminalSignal::Continue),
            "neofetch" => (neofetch(store), false, TerminalSignal::Continue),
            "ls" => (list_items(store), false, TerminalSignal::Continue),
            "cowsay" => (cowsay(args), false, TerminalSignal::Continue),
            "uname" => (uname(args), false, TerminalSignal::Continue),
            "ping" => (ping(args), false, TerminalSignal::Continue),
            other => (
                format!("{other}: command not found"),
                true,
                TerminalSignal::Continue,
            ),
        };

        self.history.push(CommandOutput {
            command: input.to_string(),
            output,
            is_error,
        });
        signal
    }
}

fn help_text() -> String {
    [
        "사용 가능한 명령:",
        "  whoami    현재 사용자",
        "  date      현재 시각",
        "  echo      입력을 그대로 출력",
        "  fortune   오늘의 운세",
        "  neofetch  시스템 정보",
        "  ls        데스크톱 아이템 목록",
        "  cowsay    소가 말한다",
        "  uname     시스템 이름",
        "  ping      연결 흉내",
        "  clear     화면 지우기",
        "  exit      터미널 종료",
    ]
    .join("\n")
}

fn whoami(store: &DesktopStore) -> String {
    store
        .user()
        .map(|u| u.username.clone())
        .unwrap_or_else(|| "guest".to_string())
}

fn fortune() -> String {
    FORTUNES
        .choose(&mut rand::rng())
        .map(|s| s.to_string())
        .unwrap_or_default()
}

fn neofetch(store: &DesktopStore) -> String {
    let user = whoami(store);
    let theme = format!("{:?}", store.theme()).to_lowercase();
    format!(
        "        _____        {user}@viros\n\
         \x20      /  _  \\       ----------\n\
         \x20     | (_) (_)      OS: VirOS 1.0 x86_64\n\
         \x20     |  ___  |      Shell: toysh 0.1\n\
         \x20      \\_____/       Theme: {theme}\n\
         \x20                    Windows: {open}",
        user = user,
        theme = theme,
        open = store.windows().len(),
    )
}

fn list_items(store: &DesktopStore) -> String {
    let mut names: Vec<&str> = store
        .items()
        .iter()
        .filter(|i| i.parent_id.is_none())
        .map(|i| i.name.as_str())
        .collect();
    names.sort_unstable();
    names.join("  ")
}

fn cowsay(message: &str) -> String {
    let message = if message.is_empty() { "moo" } else { message };
    let width = message.chars().count();
    format!(
        " {border}\n< {message} >\n {border}\n        \\   ^__^\n         \\  (oo)\\_______\n            (__)\\       )\\/\\\n                ||----w |\n                ||     ||",
        border = "-".repeat(width + 2),
        message = message,
    )
}

fn uname(args: &str) -> String {
    if args.contains("-a") {
        "VirOS viros 1.0.0 #1 SMP x86_64 VirOS".to_string()
    } else {
        "VirOS".to_string()
    }
}

fn ping(args: &str) -> String {
    let host = if args.is_empty() { "localhost" } else { args };
    let mut rng = rand::rng();
    let lines: Vec<String> = (1..=4)
        .map(|seq| {
            let ms: f64 = rng.random_range(0.2..15.0);
            format!("64 bytes from {host}: icmp_seq={seq} ttl=64 time={ms:.1} ms")
        })
        .collect();
    format!(
        "PING {host} 56(84) bytes of data.\n{}\n--- {host} ping statistics ---\n4 packets transmitted, 4 received, 0% packet loss",
        lines.join("\n"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStateStore;
    use deskboard_core::config::DesktopConfig;

    fn test_store() -> DesktopStore {
        DesktopStore::new(
            Box::new(MemoryStateStore::new(64 * 1024)),
            &DesktopConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn echo_repeats_arguments() {
        let store = test_store();
        let mut term = Terminal::new();

        let signal = term.execute(&store, "echo 안녕 터미널");
        assert_eq!(signal, TerminalSignal::Continue);
        assert_eq!(term.history().len(), 1);
        assert_eq!(term.history()[0].output, "안녕 터미널");
        assert!(!term.history()[0].is_error);
    }

    #[test]
    fn unknown_command_is_error() {
        let store = test_store();
        let mut term = Terminal::new();

        term.execute(&store, "frobnicate --now");
        assert!(term.history()[0].is_error);
        assert_eq!(term.history()[0].output, "frobnicate: command not found");
    }

    #[test]
    fn clear_empties_history() {
        let store = test_store();
        let mut term = Terminal::new();

        term.execute(&store, "echo one");
        term.execute(&store, "echo two");
        assert_eq!(term.history().len(), 2);

        let signal = term.execute(&store, "clear");
        assert_eq!(signal, TerminalSignal::Clear);
        assert!(term.history().is_empty());
    }

    #[test]
    fn exit_signals_close() {
        let store = test_store();
        let mut term = Terminal::new();
        assert_eq!(term.execute(&store, "exit"), TerminalSignal::Exit);
    }

    #[test]
    fn ls_shows_top_level_items() {
        let store = test_store();
        let mut term = Terminal::new();

        term.execute(&store, "ls");
        let output = &term.history()[0].output;
        assert!(output.contains("Documents"));
        assert!(output.contains("Terminal"));
    }

    #[test]
    fn whoami_tracks_login() {
        let mut store = test_store();
        let mut term = Terminal::new();

        term.execute(&store, "whoami");
        assert_eq!(term.history()[0].output, "guest");

        store.login("user", "password").unwrap();
        term.execute(&store, "whoami");
        assert_eq!(term.history()[1].output, "user");
    }

    #[test]
    fn cowsay_frames_message() {
        let store = test_store();
        let mut term = Terminal::new();

        term.execute(&store, "cowsay hello");
        let output = &term.history()[0].output;
        assert!(output.contains("< hello >"));
        assert!(output.contains("(oo)"));
    }

    #[test]
    fn empty_input_is_ignored() {
        let store = test_store();
        let mut term = Terminal::new();

        assert_eq!(term.execute(&store, "   "), TerminalSignal::Continue);
        assert!(term.history().is_empty());
    }
}
