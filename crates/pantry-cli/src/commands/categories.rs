use std::io::{Read, Write};

use pantry_lib::output::ConsoleIO;
use pantry_lib::runtime::Runtime;

/// Label printed for the slot reserved by rows without a category.
const MISSING_LABEL: &str = "<missing>";

/// Run the `pantry categories` command.
pub fn run_categories<IN, OUT, ERR>(
    runtime: &Runtime,
    io: &mut dyn ConsoleIO<IN, OUT, ERR>,
) -> anyhow::Result<()>
where
    IN: Read,
    OUT: Write,
    ERR: Write,
{
    for (code, label) in runtime.categories.iter() {
        writeln!(io.stdout(), "{code}\t{}", label.unwrap_or(MISSING_LABEL))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pantry_lib::output::BufferedIO;

    use crate::test_util::sample_context;

    #[test]
    fn try_run_categories_lists_codes_in_order() {
        let (_tmp, ctx) = sample_context();
        let mut io = BufferedIO::new();

        crate::try_run(&["pantry", "categories"], &ctx, &mut io).unwrap();

        assert_eq!(
            io.stdout_to_string(),
            "0\tDessert\n1\tSoup\n2\tBread\n3\t<missing>\n4\tSalad\n"
        );
        assert_eq!(io.stderr_to_string(), "");
    }
}
