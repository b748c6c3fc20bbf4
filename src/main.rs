use didsmoke::entry;
use didsmoke::error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
