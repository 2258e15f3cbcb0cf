//! Top-level GUI elements and functionality.

pub mod transforms;

mod colors;

use crate::config::MazeConfig;
use crate::generator;
use crate::grid::Direction;
use crate::simulation::MazeSimulation;
use eframe::egui;
use eframe::egui::{Align2, Key, Pos2, Rect, RichText, Rounding, Shape, Stroke, Ui};
use log::info;
use rapier2d::na::{Isometry2, Point2, Vector2};

use self::colors::{BALL_COLOR, BOUNDARY_COLOR, GOAL_COLOR, WALL_COLOR, WIN_TEXT_COLOR};
use self::transforms::Transform;

/// Launches the GUI application. Blocks until the application has quit.
pub fn run_gui(config: MazeConfig) -> Result<(), eframe::Error> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(egui::vec2(config.window_width, config.window_height)),
        ..Default::default()
    };
    eframe::run_native(
        "Marble Maze",
        native_options,
        Box::new(|_cc| Box::new(App::new(config))),
    )
}

struct App {
    config: MazeConfig,
    simulation: MazeSimulation,
    won: bool,
}

impl App {
    fn new(config: MazeConfig) -> Self {
        let maze = generator::generate(config.rows, config.cols, &mut rand::thread_rng());
        info!(
            "generated {}x{} maze with {} passages",
            config.rows,
            config.cols,
            maze.open_passage_count()
        );
        let simulation = MazeSimulation::new(&maze, &config);
        Self {
            config,
            simulation,
            won: false,
        }
    }

    fn read_input(&mut self, ctx: &egui::Context) {
        let speed = self.config.move_speed;
        ctx.input(|i| {
            for (keys, direction) in [
                ([Key::W, Key::ArrowUp], Direction::Up),
                ([Key::D, Key::ArrowRight], Direction::Right),
                ([Key::S, Key::ArrowDown], Direction::Down),
                ([Key::A, Key::ArrowLeft], Direction::Left),
            ] {
                if keys.iter().any(|key| i.key_pressed(*key)) {
                    self.simulation.push(direction, speed);
                }
            }
        });
    }

    fn draw_game(&mut self, ui: &mut Ui) {
        let canvas = ui.max_rect();
        let world_to_screen = Transform::new_letterboxed(
            Pos2::new(-0.5, -0.5),
            Pos2::new(
                self.config.cols as f32 + 0.5,
                self.config.rows as f32 + 0.5,
            ),
            canvas.min,
            canvas.max,
        );

        let painter = ui.painter();

        // the goal zone
        let (goal_center, goal_half) = self.simulation.goal_zone();
        let goal_rect = Rect::from_two_pos(
            world_to_screen.map_point(Pos2::new(
                goal_center.x - goal_half.x,
                goal_center.y - goal_half.y,
            )),
            world_to_screen.map_point(Pos2::new(
                goal_center.x + goal_half.x,
                goal_center.y + goal_half.y,
            )),
        );
        painter.rect(
            goal_rect,
            Rounding::ZERO,
            GOAL_COLOR,
            Stroke::new(1.0, GOAL_COLOR),
        );

        // walls are drawn from physics poses; released walls tumble, so
        // each is painted as a polygon rather than an axis-aligned rect
        for (pose, half_extents) in self.simulation.boundary_states() {
            painter.add(Shape::convex_polygon(
                wall_corners(&world_to_screen, &pose, &half_extents),
                BOUNDARY_COLOR,
                Stroke::new(1.0, BOUNDARY_COLOR),
            ));
        }
        for (pose, half_extents) in self.simulation.wall_states() {
            painter.add(Shape::convex_polygon(
                wall_corners(&world_to_screen, &pose, &half_extents),
                WALL_COLOR,
                Stroke::new(1.0, WALL_COLOR),
            ));
        }

        // the ball
        let ball = self.simulation.ball_position();
        painter.circle_filled(
            world_to_screen.map_point(Pos2::new(ball.x, ball.y)),
            world_to_screen.map_dist(self.config.ball_radius),
            BALL_COLOR,
        );
    }
}

/// Screen-space corners of a wall cuboid under its current pose.
fn wall_corners(
    world_to_screen: &Transform,
    pose: &Isometry2<f32>,
    half_extents: &Vector2<f32>,
) -> Vec<Pos2> {
    [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)]
        .iter()
        .map(|(sx, sy)| {
            let corner =
                pose.transform_point(&Point2::new(sx * half_extents.x, sy * half_extents.y));
            world_to_screen.map_point(Pos2::new(corner.x, corner.y))
        })
        .collect()
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.read_input(ctx);

        if self.simulation.step() && !self.won {
            self.won = true;
            info!("ball reached the goal");
            self.simulation.release_walls();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_game(ui);
        });

        if self.won {
            egui::Window::new("winner")
                .title_bar(false)
                .resizable(false)
                .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                .show(ctx, |ui| {
                    ui.label(
                        RichText::new("You win!")
                            .size(64.0)
                            .color(WIN_TEXT_COLOR)
                            .strong(),
                    );
                });
        }

        // the physics loop is driven by the repaint cycle
        ctx.request_repaint();
    }
}
