//! List command

use crate::ListArgs;
use anyhow::Result;
use filmgrade_ops::Operator;

pub fn run(args: ListArgs) -> Result<()> {
    for op in Operator::ALL {
        if args.names {
            println!("{}", op.name());
        } else {
            let kind = if op.is_stochastic() { "  (random)" } else { "" };
            println!("{:<20} {:<22} {}ch{}", op.name(), op.display_name(), op.output_channels(), kind);
        }
    }
    Ok(())
}
