//! Action execution against the cursor, the stack and the renderer.

use lsys_graphics::math::advance;
use lsys_graphics::types::Scalar;

use crate::action::Action;
use crate::error::{LsysResult, Severity};

use super::Pass;

impl Pass<'_, '_> {
    /// Execute one action. `index` is the symbol position, for errors.
    pub(crate) fn dispatch(&mut self, action: Action, index: usize) -> LsysResult<()> {
        let p = self.params;
        match action {
            Action::Noop => {}
            Action::Draw(length) => {
                let to = advance(
                    self.cursor.position,
                    self.cursor.heading,
                    length.unwrap_or(self.cursor.step_length),
                );
                self.renderer.pen_down();
                self.cursor.pen_down = true;
                self.renderer.line_to(to);
                self.cursor.position = to;
            }
            Action::Jump(length) => {
                let to = advance(
                    self.cursor.position,
                    self.cursor.heading,
                    length.unwrap_or(self.cursor.step_length),
                );
                self.renderer.pen_up();
                self.renderer.move_to(to);
                self.renderer.pen_down();
                self.cursor.position = to;
                self.cursor.pen_down = true;
            }
            Action::TurnLeft(angle) => {
                self.set_heading(self.cursor.heading + angle.unwrap_or(self.cursor.turning_angle));
            }
            Action::TurnRight(angle) => {
                self.set_heading(self.cursor.heading - angle.unwrap_or(self.cursor.turning_angle));
            }
            Action::Reverse => self.set_heading(-self.cursor.heading),
            Action::Push => self.stack.push(self.cursor.snapshot()),
            Action::Pop => {
                let snapshot = self.stack.pop().map_err(|err| {
                    err.with_position(index).with_severity(Severity::Fatal)
                })?;
                self.renderer.pen_up();
                self.cursor.restore(&snapshot);
                self.renderer.move_to(snapshot.position);
                self.renderer.set_heading(snapshot.heading);
                self.renderer.set_pen_width(snapshot.pen_width);
                self.renderer.pen_down();
                self.cursor.pen_down = true;
            }
            Action::Width(adjust) => {
                let width = adjust.apply(self.cursor.pen_width, p.width_increment, p.scale_factor);
                self.cursor.pen_width = width;
                self.renderer.set_pen_width(width);
            }
            Action::Length(adjust) => {
                self.cursor.step_length =
                    adjust.apply(self.cursor.step_length, p.length_increment, p.scale_factor);
            }
            Action::Angle(adjust) => {
                self.cursor.turning_angle =
                    adjust.apply(self.cursor.turning_angle, p.angle_increment, p.scale_factor);
            }
        }
        Ok(())
    }

    fn set_heading(&mut self, heading: Scalar) {
        self.cursor.heading = heading;
        self.renderer.set_heading(heading);
    }
}
