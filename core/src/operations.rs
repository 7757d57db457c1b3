use rand::Rng;

use crate::constants::GLYPH_SIZE;
use crate::error::Result;
use crate::keypad::Keypad;
use crate::opcode::Opcode;
use crate::state::State;

/// clear
pub fn clr(_op: u16, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.screen.clear();
    state.draw_flag = true;
    state.advance();
    Ok(())
}

/// PC = STACK.pop() + 2
pub fn rts(_op: u16, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.pc = state.pop()?;
    state.advance();
    Ok(())
}

/// PC = addr
pub fn jump(op: u16, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.pc = op.nnn();
    Ok(())
}

/// STACK.push(PC); PC = addr
/// The caller's own address is saved; `rts` steps past it.
pub fn call(op: u16, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.push(state.pc)?;
    state.pc = op.nnn();
    Ok(())
}

/// if Vx == nn then skip
pub fn ske(op: u16, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.skip_if(state.v[op.x()] == op.nn());
    Ok(())
}

/// if Vx != nn then skip
pub fn skne(op: u16, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.skip_if(state.v[op.x()] != op.nn());
    Ok(())
}

/// if Vx == Vy then skip
pub fn skre(op: u16, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.skip_if(state.v[op.x()] == state.v[op.y()]);
    Ok(())
}

/// Vx = nn
pub fn load(op: u16, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.v[op.x()] = op.nn();
    state.advance();
    Ok(())
}

/// Vx += nn
/// Wraps on overflow without touching VF
pub fn add(op: u16, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.v[op.x()] = state.v[op.x()].wrapping_add(op.nn());
    state.advance();
    Ok(())
}

/// Vx = Vy
pub fn mv(op: u16, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.v[op.x()] = state.v[op.y()];
    state.advance();
    Ok(())
}

/// Vx |= Vy
pub fn or(op: u16, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.v[op.x()] |= state.v[op.y()];
    state.advance();
    Ok(())
}

/// Vx &= Vy
pub fn and(op: u16, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.v[op.x()] &= state.v[op.y()];
    state.advance();
    Ok(())
}

/// Vx ^= Vy
pub fn xor(op: u16, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.v[op.x()] ^= state.v[op.y()];
    state.advance();
    Ok(())
}

/// Vx += Vy; VF = carry
pub fn addr(op: u16, state: &mut State, _keypad: &Keypad) -> Result<()> {
    let (res, carry) = state.v[op.x()].overflowing_add(state.v[op.y()]);
    state.v[op.x()] = res;
    state.set_flag(carry);
    state.advance();
    Ok(())
}

/// Vx -= Vy; VF = !borrow
pub fn sub(op: u16, state: &mut State, _keypad: &Keypad) -> Result<()> {
    let (res, borrow) = state.v[op.x()].overflowing_sub(state.v[op.y()]);
    state.v[op.x()] = res;
    state.set_flag(!borrow);
    state.advance();
    Ok(())
}

/// Vx >>= 1; VF = lsb before the shift
pub fn shr(op: u16, state: &mut State, _keypad: &Keypad) -> Result<()> {
    let before = state.v[op.x()];
    state.v[op.x()] = before >> 1;
    state.set_flag(before & 0x1 == 0x1);
    state.advance();
    Ok(())
}

/// Vx = Vy - Vx; VF = !borrow
pub fn subn(op: u16, state: &mut State, _keypad: &Keypad) -> Result<()> {
    let (res, borrow) = state.v[op.y()].overflowing_sub(state.v[op.x()]);
    state.v[op.x()] = res;
    state.set_flag(!borrow);
    state.advance();
    Ok(())
}

/// Vx <<= 1; VF = msb before the shift
pub fn shl(op: u16, state: &mut State, _keypad: &Keypad) -> Result<()> {
    let before = state.v[op.x()];
    state.v[op.x()] = before << 1;
    state.set_flag(before & 0x80 == 0x80);
    state.advance();
    Ok(())
}

/// if Vx != Vy then skip
pub fn skrne(op: u16, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.skip_if(state.v[op.x()] != state.v[op.y()]);
    Ok(())
}

/// I = addr
pub fn loadi(op: u16, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.i = op.nnn();
    state.advance();
    Ok(())
}

/// PC = V0 + addr
pub fn jumpi(op: u16, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.pc = op.nnn() + u16::from(state.v[0x0]);
    Ok(())
}

/// Vx = rand_byte & nn
pub fn rand(op: u16, state: &mut State, _keypad: &Keypad) -> Result<()> {
    let rand_byte: u8 = state.rng.gen();
    state.v[op.x()] = rand_byte & op.nn();
    state.advance();
    Ok(())
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the sprite in memory I..I+n onto the screen at (Vx, Vy).
/// VF = 1 if any lit pixel was erased
pub fn draw(op: u16, state: &mut State, _keypad: &Keypad) -> Result<()> {
    let rows = state.memory_range(state.i, usize::from(op.n()))?;
    let x = usize::from(state.v[op.x()]);
    let y = usize::from(state.v[op.y()]);
    let collision = state
        .screen
        .draw_sprite(x, y, &state.memory[rows], state.sprite_mode);
    state.set_flag(collision);
    state.draw_flag = true;
    state.advance();
    Ok(())
}

/// if Vx.pressed then skip
pub fn skpr(op: u16, state: &mut State, keypad: &Keypad) -> Result<()> {
    state.skip_if(keypad.is_pressed(state.v[op.x()]));
    Ok(())
}

/// if !Vx.pressed then skip
pub fn skup(op: u16, state: &mut State, keypad: &Keypad) -> Result<()> {
    state.skip_if(!keypad.is_pressed(state.v[op.x()]));
    Ok(())
}

/// Vx = DT
pub fn moved(op: u16, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.v[op.x()] = state.delay_timer;
    state.advance();
    Ok(())
}

/// Vx = first pressed key
/// Without a pressed key nothing changes, so this instruction runs again next step
pub fn keyd(op: u16, state: &mut State, keypad: &Keypad) -> Result<()> {
    if let Some(key) = keypad.first_pressed() {
        state.v[op.x()] = key;
        state.advance();
    }
    Ok(())
}

/// DT = Vx
pub fn loads(op: u16, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.delay_timer = state.v[op.x()];
    state.advance();
    Ok(())
}

/// ST = Vx
pub fn ld(op: u16, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.sound_timer = state.v[op.x()];
    state.advance();
    Ok(())
}

/// I += Vx; VF = I > 0xFFF
/// I is not masked back to 12 bits
pub fn addi(op: u16, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.i = state.i.wrapping_add(u16::from(state.v[op.x()]));
    state.set_flag(state.i > 0xFFF);
    state.advance();
    Ok(())
}

/// I = Vx * 5
/// Set I to the address of the font glyph for Vx.
/// Values past 0xF point beyond the sprite sheet
pub fn ldspr(op: u16, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.i = u16::from(state.v[op.x()]) * GLYPH_SIZE;
    state.advance();
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(op: u16, state: &mut State, _keypad: &Keypad) -> Result<()> {
    let value = state.v[op.x()];
    let digits = [value / 100, value / 10 % 10, value % 10];
    let target = state.memory_range(state.i, digits.len())?;
    state.memory[target].copy_from_slice(&digits);
    state.advance();
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx; I += x + 1
pub fn stor(op: u16, state: &mut State, _keypad: &Keypad) -> Result<()> {
    let count = op.x() + 1;
    let target = state.memory_range(state.i, count)?;
    state.memory[target].copy_from_slice(&state.v[..count]);
    state.i += count as u16;
    state.advance();
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]; I += x + 1
pub fn read(op: u16, state: &mut State, _keypad: &Keypad) -> Result<()> {
    let count = op.x() + 1;
    let source = state.memory_range(state.i, count)?;
    state.v[..count].copy_from_slice(&state.memory[source]);
    state.i += count as u16;
    state.advance();
    Ok(())
}
