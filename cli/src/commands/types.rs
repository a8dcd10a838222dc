//! The `types` command - list the variable types.

use cligen::CvType;

/// Run the types command.
pub fn run() {
    print!("{}", table());
}

/// One line per type: code, name and accepted text.
pub fn table() -> String {
    let mut out = String::new();
    for kind in CvType::ALL {
        out.push_str(&format!(
            "{:>2}  {:<10}  {}\n",
            kind.code(),
            kind.as_str(),
            kind.grammar()
        ));
    }
    out
}
