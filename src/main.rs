use macroquad::prelude::*;
use voxel_automata::{
    OrbitCamera, Session, SessionConfig,
    application::{Cadence, Outcome, RuleEditor, StepWorker, controls},
    rendering::{self, pick},
    input, ui,
};

fn window_conf() -> Conf {
    Conf {
        window_title: "Voxel Automata".to_owned(),
        window_width: 1200,
        window_height: 800,
        window_resizable: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let mut session = match Session::new(SessionConfig::default()) {
        Ok(session) => session,
        Err(err) => {
            log::error!("cannot start session: {err}");
            return;
        }
    };
    let mut camera = OrbitCamera::new();
    let mut pointer = input::PointerTracker::new();
    let mut cadence = Cadence::new(session.config().frame_delay);
    let mut worker = StepWorker::new();
    let mut editor = RuleEditor::new(&session.rules());
    let mut paused = false;

    loop {
        let mouse_pos = mouse_position();
        let dt = get_frame_time();

        let over_panel = ui::over_panel(mouse_pos);

        // Commands from panel and keyboard; typing goes to the rule editor
        editor.sync(&session.rules());
        let buttons = ui::create_buttons(&session, paused, &editor);
        let mut commands = input::process_button_clicks(&buttons, mouse_pos);
        if editor.is_editing() {
            commands.extend(input::process_rule_typing(&mut editor, over_panel));
        } else {
            commands.extend(input::process_keyboard_input(&mut camera));
        }

        for command in commands {
            match controls::apply(&mut session, paused, command) {
                Ok(Outcome::Restarted) => {
                    // Old timer and worker belong to the superseded session
                    cadence = Cadence::new(session.config().frame_delay);
                    cadence.set_running(!paused);
                    worker = StepWorker::new();
                }
                Ok(Outcome::Retimed(delay)) => cadence.set_interval(delay),
                Ok(Outcome::Paused(now_paused)) => {
                    paused = now_paused;
                    cadence.set_running(!paused);
                }
                Ok(Outcome::Editing(field)) => editor.toggle_focus(field),
                Ok(Outcome::RulesChanged | Outcome::Unchanged) => {}
                Err(err) => log::error!("{command:?} rejected: {err}"),
            }
        }

        // Simulation cadence, stepping on the rayon pool
        if cadence.advance_when(dt, !worker.is_busy()) {
            if let Some(job) = session.next_job() {
                worker.dispatch(job);
            }
        }
        if let Some(outcome) = worker.poll() {
            session.complete(outcome);
        }

        // Camera
        if !over_panel {
            input::handle_zoom(&mut camera);
        }
        let release = pointer.update(&mut camera, mouse_pos, over_panel);
        camera.follow(session.focused_layer() as f32, dt);

        let scene = camera.to_camera3d();
        let aspect = ui::scene_width() / ui::scene_height();
        let view_projection = Camera3D {
            aspect: Some(aspect),
            ..camera.to_camera3d()
        }
        .matrix();

        // Instances for this frame, then resolve any click against them
        let frame = session.build_frame(&view_projection);
        if let Some(release) = release {
            let ray = pick::screen_ray(
                &view_projection,
                release.up,
                vec2(ui::scene_width(), ui::scene_height()),
            );
            let hit = pick::hit_test(&frame, &ray);
            session.pick(hit, release.down, release.up);
        }

        // Draw
        rendering::clear();
        set_camera(&Camera3D {
            aspect: Some(aspect),
            viewport: Some((0, 0, ui::scene_width() as i32, screen_height() as i32)),
            ..scene
        });
        rendering::draw_voxels(&frame);
        rendering::draw_layer_outline(session.history().grid_size(), session.focused_layer());

        set_default_camera();
        rendering::draw_controls(&session, paused, frame.len(), &buttons, mouse_pos);

        next_frame().await;
    }
}
