/// Runs `f` to completion on a worker thread and waits for it. Blocking
/// clients (HTTP, SQLite) must not run on the UI runtime's thread.
pub fn run_blocking<F, T>(f: F) -> T
where
    F: FnOnce() -> T + Send,
    T: Send,
{
    std::thread::scope(|scope| match scope.spawn(f).join() {
        Ok(value) => value,
        Err(panic) => std::panic::resume_unwind(panic),
    })
}
