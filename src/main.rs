fn main() {
    gatescan::app::startup::startup();
}
