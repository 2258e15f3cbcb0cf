//! Physics boundary: materializes the maze as rapier2d colliders and runs
//! the interactive simulation.

use crate::config::MazeConfig;
use crate::grid::{Direction, Maze};
use rapier2d::crossbeam::channel::{unbounded, Receiver};
use rapier2d::dynamics::{IntegrationParameters, RigidBodySet};
use rapier2d::geometry::{BroadPhase, NarrowPhase};
use rapier2d::na::{Isometry2, Point2, Vector2};
use rapier2d::prelude::*;

/// Rapier interaction group representing all walls, boundary included
const GROUP_WALL: u32 = 1;
/// Rapier interaction group representing the player ball
const GROUP_BALL: u32 = 2;
/// Rapier interaction group representing the goal zone
const GROUP_GOAL: u32 = 4;

/// Downward acceleration applied once the maze is solved
const WIN_GRAVITY: f32 = 9.81;

/// Wraps the rapier2d pipeline for one maze play-through.
///
/// Construction registers every collider the game needs: four boundary
/// walls, one thin cuboid per closed maze wall, a sensor cuboid for the
/// goal zone, and the dynamic ball. After that the only inputs are
/// [`MazeSimulation::push`] and [`MazeSimulation::step`].
pub struct MazeSimulation {
    gravity: Vector2<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,

    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,

    event_handler: ChannelEventCollector,
    collision_recv: Receiver<CollisionEvent>,
    contact_force_recv: Receiver<ContactForceEvent>,

    ball_body: RigidBodyHandle,
    ball_collider: ColliderHandle,
    goal_collider: ColliderHandle,
    goal_center: Point2<f32>,
    goal_half_extents: Vector2<f32>,
    boundary: Vec<(RigidBodyHandle, Vector2<f32>)>,
    maze_walls: Vec<(RigidBodyHandle, Vector2<f32>)>,
    walls_released: bool,
}

impl MazeSimulation {
    /// Build the physics world for a finished maze.
    pub fn new(maze: &Maze, config: &MazeConfig) -> Self {
        let mut rigid_body_set = RigidBodySet::new();
        let mut collider_set = ColliderSet::new();

        let half_thickness = config.wall_thickness / 2.0;
        let add_wall = |segment: &crate::grid::WallSegment,
                        rigid_body_set: &mut RigidBodySet,
                        collider_set: &mut ColliderSet| {
            let rigid_body = RigidBodyBuilder::fixed()
                .translation(segment.center.coords)
                .build();
            let rigid_body_handle = rigid_body_set.insert(rigid_body);

            let collider =
                ColliderBuilder::cuboid(segment.half_extents.x, segment.half_extents.y)
                    .collision_groups(InteractionGroups::new(GROUP_WALL.into(), u32::MAX.into()))
                    .build();
            collider_set.insert_with_parent(collider, rigid_body_handle, rigid_body_set);

            (rigid_body_handle, segment.half_extents)
        };

        let boundary = maze
            .boundary_segments(half_thickness)
            .iter()
            .map(|segment| add_wall(segment, &mut rigid_body_set, &mut collider_set))
            .collect();
        let maze_walls = maze
            .wall_segments(half_thickness)
            .iter()
            .map(|segment| add_wall(segment, &mut rigid_body_set, &mut collider_set))
            .collect();

        // goal zone: a fixed sensor at the far corner
        let goal_center = maze.cell_center(maze.goal_cell());
        let goal_half_extents = Vector2::new(config.goal_size / 2.0, config.goal_size / 2.0);
        let goal_body = rigid_body_set.insert(
            RigidBodyBuilder::fixed()
                .translation(goal_center.coords)
                .build(),
        );
        let goal_collider = collider_set.insert_with_parent(
            ColliderBuilder::cuboid(goal_half_extents.x, goal_half_extents.y)
                .sensor(true)
                .active_events(ActiveEvents::COLLISION_EVENTS)
                .collision_groups(InteractionGroups::new(
                    GROUP_GOAL.into(),
                    GROUP_BALL.into(),
                ))
                .build(),
            goal_body,
            &mut rigid_body_set,
        );

        // the player ball
        let ball_body = rigid_body_set.insert(
            RigidBodyBuilder::dynamic()
                .translation(maze.cell_center(maze.start_cell()).coords)
                .linear_damping(0.6)
                // walls are thinner than one step of travel at full speed
                .ccd_enabled(true)
                .build(),
        );
        let ball_collider = collider_set.insert_with_parent(
            ColliderBuilder::ball(config.ball_radius)
                .active_events(ActiveEvents::COLLISION_EVENTS)
                .collision_groups(InteractionGroups::new(
                    GROUP_BALL.into(),
                    (GROUP_WALL | GROUP_GOAL).into(),
                ))
                .build(),
            ball_body,
            &mut rigid_body_set,
        );

        let (collision_send, collision_recv) = unbounded();
        let (contact_force_send, contact_force_recv) = unbounded();
        let event_handler = ChannelEventCollector::new(collision_send, contact_force_send);

        Self {
            gravity: Vector2::new(0.0, 0.0),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),

            rigid_body_set,
            collider_set,

            event_handler,
            collision_recv,
            contact_force_recv,

            ball_body,
            ball_collider,
            goal_collider,
            goal_center,
            goal_half_extents,
            boundary,
            maze_walls,
            walls_released: false,
        }
    }

    /// Advance the simulation one step.
    ///
    /// Returns `true` iff a ball-goal contact began during this step. Any
    /// number of simultaneous contact pairs in the step's event batch still
    /// yields a single `true`.
    pub fn step(&mut self) -> bool {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &self.event_handler,
        );

        let mut reached_goal = false;
        while let Ok(event) = self.collision_recv.try_recv() {
            if let CollisionEvent::Started(a, b, _) = event {
                let pair = (a, b);
                if pair == (self.ball_collider, self.goal_collider)
                    || pair == (self.goal_collider, self.ball_collider)
                {
                    reached_goal = true;
                }
            }
        }
        while self.contact_force_recv.try_recv().is_ok() {}

        reached_goal
    }

    /// Overwrite the ball's velocity component along the pressed axis,
    /// leaving the perpendicular component unchanged.
    pub fn push(&mut self, direction: Direction, speed: f32) {
        let ball = &mut self.rigid_body_set[self.ball_body];
        let mut velocity = *ball.linvel();
        match direction {
            Direction::Up => velocity.y = -speed,
            Direction::Down => velocity.y = speed,
            Direction::Left => velocity.x = -speed,
            Direction::Right => velocity.x = speed,
        }
        ball.set_linvel(velocity, true);
    }

    /// Win effect: turn gravity on and let every maze wall fall.
    ///
    /// The boundary stays fixed so the debris remains on screen. Calling
    /// this more than once is a no-op.
    pub fn release_walls(&mut self) {
        if self.walls_released {
            return;
        }
        self.walls_released = true;
        self.gravity = Vector2::new(0.0, WIN_GRAVITY);
        for (handle, _) in &self.maze_walls {
            let wall = &mut self.rigid_body_set[*handle];
            wall.set_body_type(RigidBodyType::Dynamic, true);
            wall.enable_ccd(true);
        }
    }

    /// Whether [`MazeSimulation::release_walls`] has run.
    pub fn walls_released(&self) -> bool {
        self.walls_released
    }

    /// Current center of the ball.
    pub fn ball_position(&self) -> Point2<f32> {
        Point2::from(*self.rigid_body_set[self.ball_body].translation())
    }

    /// Pose and half extents of every maze wall body.
    ///
    /// Walls move once released, so rendering reads live physics state
    /// rather than the static maze geometry.
    pub fn wall_states(&self) -> impl Iterator<Item = (Isometry2<f32>, Vector2<f32>)> + '_ {
        self.maze_walls
            .iter()
            .map(|(handle, half_extents)| (*self.rigid_body_set[*handle].position(), *half_extents))
    }

    /// Pose and half extents of the four boundary walls.
    pub fn boundary_states(&self) -> impl Iterator<Item = (Isometry2<f32>, Vector2<f32>)> + '_ {
        self.boundary
            .iter()
            .map(|(handle, half_extents)| (*self.rigid_body_set[*handle].position(), *half_extents))
    }

    /// Center and half extents of the goal zone.
    pub fn goal_zone(&self) -> (Point2<f32>, Vector2<f32>) {
        (self.goal_center, self.goal_half_extents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn simulation(rows: usize, cols: usize, seed: u64) -> MazeSimulation {
        let config = MazeConfig {
            rows,
            cols,
            ..Default::default()
        };
        let maze = generator::generate(rows, cols, &mut StdRng::seed_from_u64(seed));
        MazeSimulation::new(&maze, &config)
    }

    #[test]
    fn ball_spawns_at_start_cell_center() {
        let sim = simulation(4, 4, 1);
        assert_eq!(sim.ball_position(), Point2::new(0.5, 0.5));
    }

    #[test]
    fn push_overwrites_only_the_pressed_axis() {
        let mut sim = simulation(4, 4, 1);
        sim.push(Direction::Right, 5.0);
        {
            let velocity = sim.rigid_body_set[sim.ball_body].linvel();
            assert_eq!(velocity.x, 5.0);
            assert_eq!(velocity.y, 0.0);
        }
        sim.push(Direction::Down, 3.0);
        let velocity = sim.rigid_body_set[sim.ball_body].linvel();
        assert_eq!(velocity.x, 5.0);
        assert_eq!(velocity.y, 3.0);
    }

    #[test]
    fn no_goal_contact_at_spawn() {
        let mut sim = simulation(4, 4, 1);
        for _ in 0..10 {
            assert!(!sim.step());
        }
    }

    #[test]
    fn ball_stays_inside_the_boundary() {
        let mut sim = simulation(6, 6, 3);
        for _ in 0..300 {
            sim.push(Direction::Right, 8.0);
            sim.step();
            let position = sim.ball_position();
            assert!(position.x > -0.5 && position.x < 6.5, "escaped: {position}");
            assert!(position.y > -0.5 && position.y < 6.5, "escaped: {position}");
        }
    }

    #[test]
    fn goal_contact_triggers_once_per_batch_and_release_is_idempotent() {
        let mut sim = simulation(2, 2, 7);
        // teleport the ball into the goal zone
        let goal_center = sim.goal_center;
        sim.rigid_body_set[sim.ball_body].set_translation(goal_center.coords, true);

        let mut contacts = 0;
        for _ in 0..10 {
            if sim.step() {
                contacts += 1;
            }
        }
        // the contact begins once and persists; no repeated Started events
        assert_eq!(contacts, 1);

        sim.release_walls();
        assert!(sim.walls_released());
        assert_eq!(sim.gravity, Vector2::new(0.0, WIN_GRAVITY));
        let (first_wall, _) = sim.maze_walls[0];
        assert_eq!(
            sim.rigid_body_set[first_wall].body_type(),
            RigidBodyType::Dynamic
        );

        // a second release and further stepping must be harmless
        sim.release_walls();
        assert_eq!(sim.gravity, Vector2::new(0.0, WIN_GRAVITY));
        for _ in 0..30 {
            sim.step();
        }
    }

    #[test]
    fn released_walls_fall() {
        let mut sim = simulation(3, 3, 11);
        let (wall, _) = sim.maze_walls[0];
        let before = sim.rigid_body_set[wall].translation().y;
        sim.release_walls();
        for _ in 0..60 {
            sim.step();
        }
        let after = sim.rigid_body_set[wall].translation().y;
        assert!(after > before, "wall did not fall: {before} -> {after}");
    }
}
