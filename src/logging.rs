pub fn log_event(component: &str, record_id: &str, event: &str, message: &str) {
    println!(
        "[{}][record:{}][{}] {}\n",
        component,
        record_id,
        event,
        message
    );
}
