//! Interactive chat loop over stdin.

use gemchat_ai::ChatSession;
use tokio::io::{AsyncBufReadExt, BufReader};

/// One line of user input.
#[derive(Debug, PartialEq, Eq)]
pub enum Command<'a> {
    Title,
    History,
    /// Close the session and open a fresh chat.
    Reset,
    Quit,
    Message(&'a str),
    Empty,
    Unknown(&'a str),
}

impl<'a> Command<'a> {
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();
        match line {
            "" => Command::Empty,
            "/title" => Command::Title,
            "/history" => Command::History,
            "/reset" => Command::Reset,
            "/quit" | "/exit" => Command::Quit,
            cmd if cmd.starts_with('/') => Command::Unknown(cmd),
            text => Command::Message(text),
        }
    }
}

const HELP: &str = "commands: /title, /history, /reset, /quit";

/// Run the loop until `/quit` or end of input.
pub async fn run(session: &mut ChatSession) -> std::io::Result<()> {
    session.start_chat();
    if !session.is_chat_active() {
        eprintln!("could not start a chat; messages will get the fallback reply");
    }
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Empty => {}
            Command::Quit => break,
            Command::Title => println!("{}", session.chat_title().await),
            Command::History => match session.chat_history() {
                Some(history) => {
                    for turn in history {
                        println!("{}: {}", turn.role.as_str(), turn.text());
                    }
                }
                None => println!("(no active chat)"),
            },
            Command::Reset => {
                session.close();
                session.start_chat();
                println!("(chat reset)");
            }
            Command::Unknown(cmd) => println!("unknown command {cmd}; {HELP}"),
            Command::Message(text) => println!("{}", session.send_message(text).await),
        }
    }

    session.close();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("/title"), Command::Title);
        assert_eq!(Command::parse("  /history "), Command::History);
        assert_eq!(Command::parse("/reset"), Command::Reset);
        assert_eq!(Command::parse("/quit"), Command::Quit);
        assert_eq!(Command::parse("/exit"), Command::Quit);
        assert_eq!(Command::parse("   "), Command::Empty);
        assert_eq!(Command::parse("/nope"), Command::Unknown("/nope"));
    }

    #[test]
    fn plain_text_is_a_message() {
        assert_eq!(
            Command::parse("  Tell me a joke\n"),
            Command::Message("Tell me a joke")
        );
        assert_eq!(Command::parse("a /title"), Command::Message("a /title"));
    }
}
