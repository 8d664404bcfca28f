use std::io::Read;
use std::process::ExitCode;

/// Reads a declaration unit from stdin and dumps its syntax tree as JSON, for debugging the
/// parser against real corpus files.
fn main() -> ExitCode {
  let mut source = String::new();
  if let Err(err) = std::io::stdin().read_to_string(&mut source) {
    eprintln!("failed to read stdin: {}", err);
    return ExitCode::FAILURE;
  };
  match parse_dts::parse(&source) {
    Ok(top_level) => {
      println!("{}", serde_json::to_string_pretty(&top_level).unwrap());
      ExitCode::SUCCESS
    }
    Err(err) => {
      eprintln!("{:?}", err);
      ExitCode::FAILURE
    }
  }
}
