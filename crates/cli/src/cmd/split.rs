use fencepost_core::split;

use super::input::read_input;
use super::output::print_json;
use crate::InputArgs;

pub fn run(args: &InputArgs) {
    let text = read_input(args.file.as_deref());
    print_json(&split(&text));
}
