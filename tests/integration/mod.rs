//! Integration tests driving the compiled binary against real git
//! checkouts

mod helpers;

mod test_board;
mod test_changelog;
mod test_docs;
mod test_init;
mod test_package;
mod test_pr;
mod test_release;
mod test_version;
