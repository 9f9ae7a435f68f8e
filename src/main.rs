mod app;
mod assets;
mod controller;
mod render;
mod scene;
mod ui;

fn main() {
    app::run();
}
