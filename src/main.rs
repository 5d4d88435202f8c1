use shatter::HostError;

fn main() -> Result<(), HostError> {
    shatter::window::run()
}
