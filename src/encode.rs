/*!
# Greedy Encoder

A single-pass greedy encoder for the self-
referential variants `0x81`/`0x83`. No encoder exists for the
dictionary-backed `0x01`/`0x03` variants — see [`crate::error::EncodeError::Unimplemented`]
and `DESIGN.md` for why.

At each output position the encoder considers, in order:

1. a same-byte run (only for `0x83`, which has run tokens at all),
2. the longest back-reference available within the 4095-byte window,

and falls back to a literal when neither clears its minimum length. Ties
between a run and a back-reference of the same length favor the
back-reference, since [`crate::bitstream::CommandWriter`] framing cost
is identical either way and a back-reference also seeds future matches
at the same distance.
*/

use crate::bitstream::CommandWriter;

/// Longest back-reference either variant's encoder emits. The decoder's
/// length nibble can in principle carry up to 18 for `0x81` (no run
/// tokens competing for the all-ones nibble value there), but spec
/// §4.4 caps the encoder itself at 17 for both variants; 18 is only
/// ever produced by the reference decoder's permissive accept range,
/// never by a spec-conformant encoder.
const MAX_BACKREF_LEN: usize = 17;
const MAX_BACKREF_DISTANCE: usize = 4095;
const MAX_SHORT_RUN_LEN: usize = 18;
const MAX_LONG_RUN_LEN: usize = 274;

/// Encode `input` as a self-referential `0x81` stream: back-references
/// and literals only, no run tokens.
pub fn encode_81(input: &[u8]) -> Vec<u8> {
    encode_core(input, false)
}

/// Encode `input` as a self-referential `0x83` stream: adds short/long
/// run tokens to `0x81`'s repertoire.
pub fn encode_83(input: &[u8]) -> Vec<u8> {
    encode_core(input, true)
}

/// Worst-case compressed size for an `encode_81`/`encode_83` call on
/// `len` bytes of input: every byte emitted as a literal, plus one flag
/// byte per 8 literals.
pub fn encoded_upper_bound(len: usize) -> usize {
    len + (len + 7) / 8
}

fn encode_core(input: &[u8], has_multi_byte: bool) -> Vec<u8> {
    let n = input.len();
    let mut out = Vec::with_capacity(encoded_upper_bound(n));
    let mut writer = CommandWriter::new();

    let mut pos = 0usize;
    while pos < n {
        let remaining = n - pos;

        let run_len = if has_multi_byte {
            scan_run(input, pos, remaining.min(MAX_LONG_RUN_LEN))
        } else {
            0
        };

        let (back_off, back_len) = find_best_backref(input, pos, MAX_BACKREF_LEN.min(remaining));

        if run_len >= 4 && run_len > back_len {
            emit_run(&mut out, &mut writer, input[pos], run_len);
            pos += run_len;
        } else if back_len >= 3 {
            emit_backref(&mut out, &mut writer, back_off, back_len);
            pos += back_len;
        } else {
            emit_literal(&mut out, &mut writer, input[pos]);
            pos += 1;
        }
    }

    out
}

/// Count how many bytes starting at `pos` equal `input[pos]`, capped at
/// `max_len`. Always at least 1 (the byte matches itself).
fn scan_run(input: &[u8], pos: usize, max_len: usize) -> usize {
    let byte = input[pos];
    let mut len = 1;
    while len < max_len && input[pos + len] == byte {
        len += 1;
    }
    len
}

/// Search `[pos - MAX_BACKREF_DISTANCE, pos - 1]` for the longest match
/// against `input[pos..]`, scanning nearest-first so that equal-length
/// matches keep the smallest offset. Matches are checked directly
/// against `input` rather than a materialized output buffer, which
/// lets a candidate with `start + len > pos` still match correctly: the
/// decoder's self-propagating copy reproduces exactly that overlap.
fn find_best_backref(input: &[u8], pos: usize, max_len: usize) -> (u16, usize) {
    if max_len < 3 || pos == 0 {
        return (0, 0);
    }

    let window_start = pos.saturating_sub(MAX_BACKREF_DISTANCE);
    let mut best_off = 0u16;
    let mut best_len = 0usize;
    let mut start = pos - 1;

    loop {
        let mut len = 0;
        while len < max_len && pos + len < input.len() && input[start + len] == input[pos + len] {
            len += 1;
        }
        if len > best_len {
            best_len = len;
            best_off = (pos - start) as u16;
            if best_len >= max_len {
                break;
            }
        }
        if start == window_start {
            break;
        }
        start -= 1;
    }

    (best_off, best_len)
}

fn emit_literal(out: &mut Vec<u8>, writer: &mut CommandWriter, byte: u8) {
    writer.write_flag(out, true);
    out.push(byte);
}

/// `count` is 3..=17 for either variant; `offset` is 1..=4095.
fn emit_backref(out: &mut Vec<u8>, writer: &mut CommandWriter, offset: u16, count: usize) {
    writer.write_flag(out, false);
    let c0 = (offset & 0xFF) as u8;
    let blow = ((offset >> 8) & 0x0F) as u8;
    let bhigh = (count - 3) as u8;
    out.push(c0);
    out.push((bhigh << 4) | blow);
}

/// `count` is 4..=274. Picks the short (4..=18) or long (19..=274) run
/// token depending on which range `count` falls in.
fn emit_run(out: &mut Vec<u8>, writer: &mut CommandWriter, byte: u8, count: usize) {
    writer.write_flag(out, false);
    if count <= MAX_SHORT_RUN_LEN {
        let blow = (count - 3) as u8;
        out.push(byte);
        out.push(0xF0 | blow);
    } else {
        let c0 = (count - 19) as u8;
        out.push(c0);
        out.push(0xF0);
        out.push(byte);
    }
}
